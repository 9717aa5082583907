use leptos::prelude::*;

/// Header of a list page: title, live subtitle and action buttons
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    /// e.g. "12 of 40 shown"
    #[prop(optional, into)]
    subtitle: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-text">
                <h1 class="page__title">{title}</h1>
                {move || subtitle.get().map(|s| view! {
                    <div class="page__subtitle">{s}</div>
                })}
            </div>
            <div class="page__actions">
                {children()}
            </div>
        </div>
    }
}
