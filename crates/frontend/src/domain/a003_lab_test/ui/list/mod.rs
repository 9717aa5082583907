use crate::domain::a003_lab_test::catalog::category_options;
use crate::domain::a003_lab_test::record::{collection, name_category_groups};
use crate::domain::a003_lab_test::ui::catalog::CatalogPicker;
use crate::domain::a003_lab_test::ui::details::LabTestDetails;
use crate::shared::api_utils::ApiConfig;
use crate::shared::components::{FilterBar, PageHeader, RowActions, StatsBar, StatusBadge};
use crate::shared::icons::icon;
use crate::shared::list_pattern::remote::fetch_all;
use crate::shared::list_pattern::view::StatusFilter;
use crate::shared::list_screen::{ListScreen, LoadStatus, ScreenOverlays};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a003_lab_test::aggregate::{LabTest, LabTestDto};
use contracts::domain::a004_test_category::aggregate::TestCategory;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn LabTestList() -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let screen = ListScreen::<LabTestDto>::new(collection(config.clone()));
    let state = screen.state();
    let grouped = screen.grouped_view();
    screen.reload();

    // Without the category list the selects fall back to the categories
    // referenced by the menu itself
    let categories = RwSignal::new(Vec::<TestCategory>::new());
    spawn_local(async move {
        match fetch_all::<TestCategory>(&config, TestCategory::collection_name()).await {
            Ok(loaded) => {
                let _ = categories.try_set(loaded);
            }
            Err(e) => log::warn!("Failed to load test categories: {}", e),
        }
    });
    let category_choices = Memo::new(move |_| {
        categories.with(|cats| state.with(|c| category_options(cats, c.mirror().records())))
    });

    let catalog_open = RwSignal::new(false);
    let fields_only = RwSignal::new(false);

    view! {
        <PageFrame page_id="a003_lab_test--list" category=PAGE_CAT_LIST>
            <PageHeader
                title="Lab tests"
                subtitle=Signal::derive(move || {
                    let view = grouped.get();
                    format!("{} of {} shown", view.matched, view.stats.total)
                })
            >
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=screen.is_busy()
                    on_click=move |_| {
                        fields_only.set(false);
                        screen.open_create();
                    }
                >
                    {icon("plus")}
                    " New lab test"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=screen.is_busy()
                    on_click=move |_| {
                        fields_only.set(false);
                        catalog_open.set(true);
                    }
                >
                    {icon("catalog")}
                    " Add from catalog"
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
                <StatsBar stats=Signal::derive(move || grouped.get().stats) show_report_format=true />

                <FilterBar
                    search=Signal::derive(move || state.with(|c| c.filter().search_text.clone()))
                    on_search=Callback::new(move |text: String| screen.set_search_text(text))
                    status=Signal::derive(move || state.with(|c| c.filter().status))
                    on_status=Callback::new(move |status: StatusFilter| screen.set_status_filter(status))
                    status_options=StatusFilter::WITH_REPORT_FORMAT.to_vec()
                    search_placeholder="Search by name or code"
                    categories=Signal::derive(move || category_choices.get())
                    category=Signal::derive(move || state.with(|c| c.filter().category.clone()))
                    on_category=Callback::new(move |category: Option<String>| {
                        screen.set_category_filter(category)
                    })
                    on_reset=Callback::new(move |_| screen.reset_filter())
                />

                <LoadStatus
                    screen=screen
                    matched=Signal::derive(move || grouped.get().matched)
                    empty_message="The test menu is empty. Create a test or add one from the catalog."
                />

                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell resizable=true min_width=220.0>"Name"</TableHeaderCell>
                            <TableHeaderCell min_width=90.0>"Code"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Price"</TableHeaderCell>
                            <TableHeaderCell min_width=110.0>"Report"</TableHeaderCell>
                            <TableHeaderCell min_width=90.0>"Status"</TableHeaderCell>
                            <TableHeaderCell min_width=170.0>"Actions"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let groups = categories
                                .with(|cats| name_category_groups(grouped.get().groups, cats));
                            groups.into_iter().map(|group| {
                                let label = group.label.unwrap_or_default();
                                let count = group.records.len();
                                view! {
                                    <TableRow class="table__group-row">
                                        <TableCell attr:colspan="6">
                                            <strong>{label}</strong>
                                            <span class="table__group-count">{format!(" ({})", count)}</span>
                                        </TableCell>
                                    </TableRow>
                                    {group
                                        .records
                                        .into_iter()
                                        .map(|t| lab_test_row(screen, fields_only, t))
                                        .collect_view()}
                                }
                            }).collect_view()
                        }}
                    </TableBody>
                </Table>
            </div>

            <LabTestDetails
                screen=screen
                categories=Signal::derive(move || category_choices.get())
                fields_only=fields_only
            />
            <CatalogPicker
                screen=screen
                open=catalog_open
                categories=Signal::derive(move || category_choices.get())
            />
            <ScreenOverlays screen=screen />
        </PageFrame>
    }
}

fn lab_test_row(
    screen: ListScreen<LabTestDto>,
    fields_only: RwSignal<bool>,
    t: LabTest,
) -> impl IntoView {
    let id = t.id.clone();
    let is_active = t.is_active;
    let format = t.report_format;
    let field_count = t.report_fields.len();
    let report_badge = if t.is_online() {
        view! {
            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                {format!("{} ({} fields)", format.label(), field_count)}
            </Badge>
        }
        .into_any()
    } else {
        view! {
            <Badge appearance=BadgeAppearance::Outline color=BadgeColor::Informative>
                {format.label()}
            </Badge>
        }
        .into_any()
    };

    view! {
        <TableRow class=if is_active { "table__row" } else { "table__row table__row--inactive" }>
            <TableCell>
                <TableCellLayout>{t.name}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{t.code.unwrap_or_else(|| "-".to_string())}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{format!("{:.2}", t.price)}</TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>{report_badge}</TableCellLayout>
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
                        move |_| {
                            fields_only.set(false);
                            screen.open_edit(&id);
                        }
                    })
                    on_configure=Callback::new({
                        let id = id.clone();
                        move |_| {
                            fields_only.set(true);
                            screen.open_edit(&id);
                        }
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
