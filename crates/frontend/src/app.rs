use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::api_utils::ApiConfig;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Backend location and request timeout for every screen
    provide_context(ApiConfig::from_window());

    // Sidebar visibility
    provide_context(AppGlobalContext::new());

    view! {
        <AppRoutes />
    }
}
