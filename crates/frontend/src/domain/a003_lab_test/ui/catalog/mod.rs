//! "Add from catalog" picker: global tests not yet on the lab's menu

use crate::domain::a003_lab_test::catalog::available_tests;
use crate::shared::api_utils::ApiConfig;
use crate::shared::icons::icon;
use crate::shared::list_pattern::remote::fetch_all;
use crate::shared::list_screen::ListScreen;
use contracts::domain::a003_lab_test::aggregate::LabTestDto;
use contracts::domain::a005_global_test::aggregate::GlobalTest;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[derive(Debug, Clone, PartialEq)]
enum CatalogState {
    Loading,
    Failed(String),
    Loaded(Vec<GlobalTest>),
}

#[component]
#[allow(non_snake_case)]
pub fn CatalogPicker(
    screen: ListScreen<LabTestDto>,
    open: RwSignal<bool>,
    /// (id, name) pairs for the category filter
    #[prop(into)]
    categories: Signal<Vec<(String, String)>>,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <CatalogBody screen=screen open=open categories=categories />
        </Show>
    }
}

/// Mounted only while the picker is open, so the catalog is fetched fresh
/// each time
#[component]
#[allow(non_snake_case)]
fn CatalogBody(
    screen: ListScreen<LabTestDto>,
    open: RwSignal<bool>,
    categories: Signal<Vec<(String, String)>>,
) -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let catalog = RwSignal::new(CatalogState::Loading);
    let search = RwSignal::new(String::new());
    let category = RwSignal::new(None::<String>);

    spawn_local(async move {
        let next = match fetch_all::<GlobalTest>(&config, GlobalTest::collection_name()).await {
            Ok(tests) => CatalogState::Loaded(tests),
            Err(e) => {
                log::warn!("Failed to load test catalog: {}", e);
                CatalogState::Failed(e.to_string())
            }
        };
        // Closed before the response arrived
        let _ = catalog.try_set(next);
    });

    let state = screen.state();
    let available = Memo::new(move |_| {
        catalog.with(|c| match c {
            CatalogState::Loaded(tests) => state.with(|s| {
                search.with(|text| {
                    category.with(|selected| {
                        available_tests(tests, s.mirror().records(), selected.as_deref(), text)
                            .into_iter()
                            .cloned()
                            .collect::<Vec<_>>()
                    })
                })
            }),
            _ => Vec::new(),
        })
    });

    let close = move || open.set(false);
    let handle = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            close();
        }
    });
    on_cleanup(move || handle.remove());

    let pick = move |test: GlobalTest| {
        screen.open_create_with(test.to_lab_test_dto());
        close();
    };

    view! {
        <div class="modal-overlay" on:click=move |_| close()>
            <div class="modal modal--wide" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">"Add from catalog"</h2>
                    <button class="button button--icon modal__close" on:click=move |_| close()>
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">
                    <div class="filter-bar">
                        <div class="filter-bar__search">
                            {icon("search")}
                            <input
                                class="form__input"
                                type="search"
                                placeholder="Search catalog by name or code"
                                prop:value=move || search.get()
                                on:input=move |ev| search.set(event_target_value(&ev))
                            />
                        </div>
                        <select
                            class="form__select"
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                category.set(Some(value).filter(|v| !v.is_empty()));
                            }
                        >
                            <option value="" selected=move || category.with(Option::is_none)>
                                "All categories"
                            </option>
                            <For
                                each=move || categories.get()
                                key=|(id, _)| id.clone()
                                children=move |(id, name)| {
                                    let current = id.clone();
                                    view! {
                                        <option
                                            value=id
                                            selected=move || category.with(|c| c.as_deref() == Some(current.as_str()))
                                        >
                                            {name}
                                        </option>
                                    }
                                }
                            />
                        </select>
                    </div>

                    {move || match catalog.get() {
                        CatalogState::Loading => view! {
                            <div class="list-status">
                                <Spinner />
                                <span>"Loading catalog..."</span>
                            </div>
                        }.into_any(),
                        CatalogState::Failed(message) => view! {
                            <div class="list-status list-status--error">
                                {format!("Could not load the catalog: {}", message)}
                            </div>
                        }.into_any(),
                        CatalogState::Loaded(_) if available.with(Vec::is_empty) => view! {
                            <div class="list-status">
                                "Every matching catalog test is already on the menu."
                            </div>
                        }.into_any(),
                        CatalogState::Loaded(_) => view! {
                            <ul class="catalog-list">
                                {available.get().into_iter().map(|test| {
                                    let price = format!("{:.2}", test.default_price);
                                    let category = test
                                        .category
                                        .as_ref()
                                        .map(|c| c.label().to_string())
                                        .unwrap_or_default();
                                    let title = match test.code.as_deref() {
                                        Some(code) => format!("{} ({})", test.name, code),
                                        None => test.name.clone(),
                                    };
                                    view! {
                                        <li class="catalog-list__item">
                                            <div class="catalog-list__info">
                                                <strong>{title}</strong>
                                                <span class="catalog-list__meta">{category}</span>
                                            </div>
                                            <span class="catalog-list__price">{price}</span>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Primary
                                                on_click=move |_| pick(test.clone())
                                            >
                                                {icon("plus")}
                                                " Add"
                                            </Button>
                                        </li>
                                    }
                                }).collect_view()}
                            </ul>
                        }.into_any(),
                    }}
                </div>
            </div>
        </div>
    }
}
