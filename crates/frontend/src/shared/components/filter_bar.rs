use crate::shared::icons::icon;
use crate::shared::list_pattern::view::StatusFilter;
use leptos::prelude::*;

/// Search box, status select and (optionally) a category select
#[component]
pub fn FilterBar(
    #[prop(into)] search: Signal<String>,
    on_search: Callback<String>,
    #[prop(into)] status: Signal<StatusFilter>,
    on_status: Callback<StatusFilter>,
    /// Status options offered by the screen, `All` first
    status_options: Vec<StatusFilter>,
    #[prop(optional, into)] search_placeholder: Option<String>,
    /// (id, label) pairs; the select is hidden when absent
    #[prop(optional, into)]
    categories: Option<Signal<Vec<(String, String)>>>,
    #[prop(optional, into)] category: Signal<Option<String>>,
    #[prop(optional)] on_category: Option<Callback<Option<String>>>,
    /// Shown only when some filter differs from the default
    #[prop(optional)]
    on_reset: Option<Callback<()>>,
) -> impl IntoView {
    let is_filtered = move || {
        !search.get().is_empty() || status.get() != StatusFilter::All || category.get().is_some()
    };

    view! {
        <div class="filter-bar">
            <div class="filter-bar__search">
                {icon("search")}
                <input
                    class="form__input"
                    type="search"
                    placeholder=search_placeholder.unwrap_or_else(|| "Search...".to_string())
                    prop:value=move || search.get()
                    on:input=move |ev| on_search.run(event_target_value(&ev))
                />
            </div>

            <select
                class="form__select filter-bar__status"
                on:change=move |ev| {
                    on_status.run(StatusFilter::from_str_or_default(&event_target_value(&ev)))
                }
            >
                {status_options
                    .into_iter()
                    .map(|option| {
                        view! {
                            <option
                                value=option.as_str()
                                selected=move || status.get() == option
                            >
                                {option.label()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>

            {categories.map(|categories| {
                view! {
                    <select
                        class="form__select filter-bar__category"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            if let Some(cb) = on_category {
                                cb.run(if value.is_empty() { None } else { Some(value) });
                            }
                        }
                    >
                        <option value="" selected=move || category.get().is_none()>
                            "All categories"
                        </option>
                        <For
                            each=move || categories.get()
                            key=|(id, _)| id.clone()
                            children=move |(id, label)| {
                                let current = id.clone();
                                view! {
                                    <option
                                        value=id
                                        selected=move || category.get().as_deref() == Some(current.as_str())
                                    >
                                        {label}
                                    </option>
                                }
                            }
                        />
                    </select>
                }
            })}

            {on_reset.map(|reset| {
                view! {
                    <Show when=is_filtered>
                        <button
                            class="button button--ghost filter-bar__reset"
                            on:click=move |_| reset.run(())
                        >
                            "Clear filters"
                        </button>
                    </Show>
                }
            })}
        </div>
    }
}
