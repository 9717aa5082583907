use crate::shared::list_pattern::view::ViewStats;
use leptos::prelude::*;

/// Totals over the whole collection, independent of the active filter
#[component]
pub fn StatsBar(
    #[prop(into)] stats: Signal<ViewStats>,
    /// Adds the online/offline counters (lab tests)
    #[prop(optional)]
    show_report_format: bool,
) -> impl IntoView {
    let item = |label: &'static str, value: Signal<usize>, modifier: &'static str| {
        view! {
            <div class=format!("stats-bar__item stats-bar__item--{}", modifier)>
                <span class="stats-bar__value">{move || value.get()}</span>
                <span class="stats-bar__label">{label}</span>
            </div>
        }
    };

    view! {
        <div class="stats-bar">
            {item("Total", Signal::derive(move || stats.get().total), "total")}
            {item("Active", Signal::derive(move || stats.get().active), "active")}
            {item("Inactive", Signal::derive(move || stats.get().inactive), "inactive")}
            {show_report_format.then(|| view! {
                {item("Online", Signal::derive(move || stats.get().online), "online")}
                {item("Offline", Signal::derive(move || stats.get().offline), "offline")}
            })}
        </div>
    }
}
