use crate::domain::a002_staff::record::{collection, role_label};
use crate::domain::a002_staff::ui::details::StaffDetails;
use crate::shared::api_utils::ApiConfig;
use crate::shared::components::{FilterBar, PageHeader, RowActions, StatsBar, StatusBadge};
use crate::shared::icons::icon;
use crate::shared::list_pattern::view::StatusFilter;
use crate::shared::list_screen::{ListScreen, LoadStatus, ScreenOverlays};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a002_staff::aggregate::{Staff, StaffDto, StaffPermissions};
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn StaffList() -> impl IntoView {
    let screen = ListScreen::<StaffDto>::new(collection(expect_context::<ApiConfig>()));
    let state = screen.state();
    let grouped = screen.grouped_view();
    screen.reload();

    view! {
        <PageFrame page_id="a002_staff--list" category=PAGE_CAT_LIST>
            <PageHeader
                title="Staff"
                subtitle=Signal::derive(move || {
                    let view = grouped.get();
                    format!("{} of {} shown", view.matched, view.stats.total)
                })
            >
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=screen.is_busy()
                    on_click=move |_| screen.open_create()
                >
                    {icon("plus")}
                    " New staff member"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || state.with(|c| c.is_loading()))
                    on_click=move |_| screen.reload()
                >
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </PageHeader>

            <div class="page__content">
                <StatsBar stats=Signal::derive(move || grouped.get().stats) />

                <FilterBar
                    search=Signal::derive(move || state.with(|c| c.filter().search_text.clone()))
                    on_search=Callback::new(move |text: String| screen.set_search_text(text))
                    status=Signal::derive(move || state.with(|c| c.filter().status))
                    on_status=Callback::new(move |status: StatusFilter| screen.set_status_filter(status))
                    status_options=StatusFilter::ACTIVITY.to_vec()
                    search_placeholder="Search by name, username, email or phone"
                    on_reset=Callback::new(move |_| screen.reset_filter())
                />

                <LoadStatus
                    screen=screen
                    matched=Signal::derive(move || grouped.get().matched)
                    empty_message="No staff accounts yet."
                />

                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell resizable=true min_width=180.0>"Name"</TableHeaderCell>
                            <TableHeaderCell resizable=true min_width=120.0>"Username"</TableHeaderCell>
                            <TableHeaderCell min_width=130.0>"Role"</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"Permissions"</TableHeaderCell>
                            <TableHeaderCell min_width=150.0>"Last login"</TableHeaderCell>
                            <TableHeaderCell min_width=90.0>"Status"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"Actions"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            grouped
                                .get()
                                .groups
                                .into_iter()
                                .flat_map(|g| g.records)
                                .map(|s| staff_row(screen, s))
                                .collect_view()
                        }}
                    </TableBody>
                </Table>
            </div>

            <StaffDetails screen=screen />
            <ScreenOverlays screen=screen />
        </PageFrame>
    }
}

fn staff_row(screen: ListScreen<StaffDto>, s: Staff) -> impl IntoView {
    let id = s.id.clone();
    let is_active = s.is_active;
    let role = role_label(&s.role).to_string();
    let permissions = format!(
        "{} / {}",
        s.permissions.granted_count(),
        StaffPermissions::KEYS.len()
    );
    let last_login = s
        .last_login_at
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "Never".to_string());

    view! {
        <TableRow class=if is_active { "table__row" } else { "table__row table__row--inactive" }>
            <TableCell>
                <TableCellLayout>{s.name}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{s.username}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{role}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{permissions}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{last_login}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>
                    <StatusBadge is_active=is_active />
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <RowActions
                    is_active=is_active
                    blocked=screen.row_blocked(id.clone())
                    on_edit=Callback::new({
                        let id = id.clone();
                        move |_| screen.open_edit(&id)
                    })
                    on_toggle_active=Callback::new({
                        let id = id.clone();
                        move |_| screen.request_set_active(&id, !is_active)
                    })
                    on_delete=Callback::new(move |_| screen.request_delete(&id))
                />
            </TableCell>
        </TableRow>
    }
}
