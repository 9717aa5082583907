use crate::domain::a001_referrer::record::collection;
use crate::domain::a001_referrer::ui::details::ReferrerDetails;
use crate::shared::api_utils::ApiConfig;
use crate::shared::components::{FilterBar, PageHeader, RowActions, StatsBar, StatusBadge};
use crate::shared::icons::icon;
use crate::shared::list_screen::{ListScreen, LoadStatus, ScreenOverlays};
use crate::shared::list_pattern::view::StatusFilter;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a001_referrer::aggregate::{Referrer, ReferrerDto};
use leptos::prelude::*;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn ReferrerList() -> impl IntoView {
    let screen = ListScreen::<ReferrerDto>::new(collection(expect_context::<ApiConfig>()));
    let state = screen.state();
    let grouped = screen.grouped_view();
    screen.reload();

    let subtitle = Signal::derive(move || {
        let view = grouped.get();
        format!("{} of {} shown", view.matched, view.stats.total)
    });

    view! {
        <PageFrame page_id="a001_referrer--list" category=PAGE_CAT_LIST>
            <PageHeader title="Referrers" subtitle=subtitle>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=screen.is_busy()
                    on_click=move |_| screen.open_create()
                >
                    {icon("plus")}
                    " New referrer"
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
                    search_placeholder="Search by name, contact or email"
                    on_reset=Callback::new(move |_| screen.reset_filter())
                />

                <LoadStatus
                    screen=screen
                    matched=Signal::derive(move || grouped.get().matched)
                    empty_message="No referrers yet. Add the first doctor or agent."
                />

                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell resizable=true min_width=200.0>"Name"</TableHeaderCell>
                            <TableHeaderCell resizable=true min_width=140.0>"Contact"</TableHeaderCell>
                            <TableHeaderCell resizable=true min_width=180.0>"Email"</TableHeaderCell>
                            <TableHeaderCell min_width=120.0>"Commission"</TableHeaderCell>
                            <TableHeaderCell min_width=90.0>"Status"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"Actions"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || grouped.get().groups.into_iter().map(|group| {
                            let label = group.label.unwrap_or_default();
                            let count = group.records.len();
                            view! {
                                <TableRow class="table__group-row">
                                    <TableCell attr:colspan="6">
                                        <strong>{format!("{}s", label)}</strong>
                                        <span class="table__group-count">{format!(" ({})", count)}</span>
                                    </TableCell>
                                </TableRow>
                                {group.records.into_iter().map(|r| referrer_row(screen, r)).collect_view()}
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>
            </div>

            <ReferrerDetails screen=screen />
            <ScreenOverlays screen=screen />
        </PageFrame>
    }
}

fn referrer_row(screen: ListScreen<ReferrerDto>, r: Referrer) -> impl IntoView {
    let id = r.id.clone();
    let is_active = r.is_active;
    let commission = r.commission_type.format_value(r.commission_value);

    view! {
        <TableRow class=if is_active { "table__row" } else { "table__row table__row--inactive" }>
            <TableCell>
                <TableCellLayout>{r.name}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{r.contact}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{r.email.unwrap_or_else(|| "-".to_string())}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{commission}</TableCellLayout>
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
