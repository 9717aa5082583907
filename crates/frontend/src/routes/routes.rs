use crate::domain::a001_referrer::ui::list::ReferrerList;
use crate::domain::a002_staff::ui::list::StaffList;
use crate::domain::a003_lab_test::ui::list::LabTestList;
use crate::layout::Shell;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_CUSTOM;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes, A};
use leptos_router::path;

/// Landing page of the dashboard
pub const DEFAULT_ROUTE: &str = "/referrers";

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <PageFrame page_id="sys_not_found--custom" category=PAGE_CAT_CUSTOM>
            <div class="page__content page__content--centered">
                <h2>"Page not found"</h2>
                <A href=DEFAULT_ROUTE>"Back to referrers"</A>
            </div>
        </PageFrame>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=|| view! { <Redirect path=DEFAULT_ROUTE /> } />
                    <Route path=path!("/referrers") view=ReferrerList />
                    <Route path=path!("/staff") view=StaffList />
                    <Route path=path!("/lab-tests") view=LabTestList />
                </Routes>
            </Shell>
        </Router>
    }
}
