//! Create/edit form of a lab test, with the report-field schema editor

use crate::shared::components::{NumberField, SelectField, TextField};
use crate::shared::icons::icon;
use crate::shared::list_screen::ListScreen;
use crate::shared::modal::Modal;
use contracts::domain::a003_lab_test::aggregate::{LabTestDto, ReportField, ReportFormat};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn LabTestDetails(
    screen: ListScreen<LabTestDto>,
    /// (id, name) pairs for the category select
    #[prop(into)]
    categories: Signal<Vec<(String, String)>>,
    /// Opened from the "report fields" row action: only the schema is shown
    #[prop(into)]
    fields_only: Signal<bool>,
) -> impl IntoView {
    let state = screen.state();
    let is_open = Signal::derive(move || state.with(|c| c.editor().is_open()));
    let creating = screen.is_creating();
    let saving = screen.is_saving();
    let name = screen.draft_field(|d| d.name.clone());

    let format_options = Signal::stored(
        [ReportFormat::Online, ReportFormat::Offline]
            .iter()
            .map(|f| (f.as_str().to_string(), f.label().to_string()))
            .collect::<Vec<_>>(),
    );

    let title = Signal::derive(move || {
        if fields_only.get() {
            format!("Report fields: {}", name.get())
        } else if creating.get() {
            "New lab test".to_string()
        } else {
            "Edit lab test".to_string()
        }
    });

    let select_category = move |id: String| {
        let label = categories.with_untracked(|options| {
            options
                .iter()
                .find(|(value, _)| *value == id)
                .map(|(_, label)| label.clone())
        });
        screen.edit_draft(|d| {
            d.category_id = id;
            d.category_name = label;
        });
    };

    view! {
        <Show when=move || is_open.get()>
            <Modal
                title=title
                on_close=Callback::new(move |_| screen.close_editor())
                on_save=Callback::new(move |_| screen.submit_form())
                error=screen.editor_error()
                saving=saving
                save_label=if creating.get_untracked() { "Create" } else { "Save" }
            >
                <Show when=move || !fields_only.get()>
                    <TextField
                        label="Name"
                        required=true
                        value=screen.draft_field(|d| d.name.clone())
                        on_input=Callback::new(move |v: String| screen.edit_draft(|d| d.name = v))
                        disabled=saving
                    />
                    <TextField
                        label="Code"
                        placeholder="e.g. CBC"
                        value=screen.draft_field(|d| d.code.clone().unwrap_or_default())
                        on_input=Callback::new(move |v: String| {
                            screen.edit_draft(|d| d.code = Some(v).filter(|c| !c.trim().is_empty()))
                        })
                        disabled=saving
                    />
                    <SelectField
                        label="Category"
                        required=true
                        placeholder="Select category"
                        value=screen.draft_field(|d| d.category_id.clone())
                        options=categories
                        on_change=Callback::new(select_category)
                        disabled=saving
                    />
                    <NumberField
                        label="Price"
                        required=true
                        step="0.01"
                        value=screen.draft_field(|d| d.price)
                        on_input=Callback::new(move |v: f64| screen.edit_draft(|d| d.price = v))
                        disabled=saving
                    />
                </Show>
                <SelectField
                    label="Report format"
                    value=screen.draft_field(|d| d.report_format.as_str().to_string())
                    options=format_options
                    on_change=Callback::new(move |v: String| {
                        screen.edit_draft(|d| d.report_format = ReportFormat::from_str_or_default(&v))
                    })
                    disabled=saving
                />
                <ReportFieldsEditor screen=screen />
            </Modal>
        </Show>
    }
}

/// Rows of name / unit / reference range; only meaningful for online reports
#[component]
fn ReportFieldsEditor(screen: ListScreen<LabTestDto>) -> impl IntoView {
    let fields = screen.draft_field(|d| d.report_fields.clone());
    let online = screen.draft_field(|d| d.report_format == ReportFormat::Online);
    let saving = screen.is_saving();
    let count = Memo::new(move |_| fields.with(Vec::len));

    let row_indices = move || (0..count.get()).collect::<Vec<usize>>();

    let cell = move |idx: usize, read: fn(&ReportField) -> String| {
        Signal::derive(move || fields.with(|f| f.get(idx).map(read).unwrap_or_default()))
    };

    view! {
        <Show
            when=move || online.get()
            fallback=|| view! {
                <p class="form__hint">"Offline reports are attached as files; no schema is needed."</p>
            }
        >
            <fieldset class="form__fieldset report-fields">
                <legend class="form__legend">"Report fields"</legend>
                <Show when=move || count.get() == 0>
                    <p class="form__hint">"No fields yet."</p>
                </Show>
                <For
                    each=row_indices
                    key=|idx| *idx
                    children=move |idx| {
                        let name = cell(idx, |f| f.name.clone());
                        let unit = cell(idx, |f| f.unit.clone().unwrap_or_default());
                        let range = cell(idx, |f| f.reference_range.clone().unwrap_or_default());
                        view! {
                            <div class="report-fields__row">
                                <input
                                    class="form__input"
                                    placeholder=format!("Field #{} name", idx + 1)
                                    prop:value=move || name.get()
                                    disabled=move || saving.get()
                                    on:input=edit_row(screen, idx, |f, v| f.name = v)
                                />
                                <input
                                    class="form__input"
                                    placeholder="Unit"
                                    prop:value=move || unit.get()
                                    disabled=move || saving.get()
                                    on:input=edit_row(screen, idx, |f, v| f.unit = non_blank(v))
                                />
                                <input
                                    class="form__input"
                                    placeholder="Reference range"
                                    prop:value=move || range.get()
                                    disabled=move || saving.get()
                                    on:input=edit_row(screen, idx, |f, v| f.reference_range = non_blank(v))
                                />
                                <Button
                                    size=ButtonSize::Small
                                    appearance=ButtonAppearance::Subtle
                                    disabled=saving
                                    on_click=move |_| {
                                        screen.edit_draft(|d| {
                                            if idx < d.report_fields.len() {
                                                d.report_fields.remove(idx);
                                            }
                                        })
                                    }
                                >
                                    {icon("delete")}
                                </Button>
                            </div>
                        }
                    }
                />
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Secondary
                    disabled=saving
                    on_click=move |_| screen.edit_draft(|d| d.report_fields.push(ReportField::default()))
                >
                    {icon("plus")}
                    " Add field"
                </Button>
            </fieldset>
        </Show>
    }
}

fn edit_row(
    screen: ListScreen<LabTestDto>,
    idx: usize,
    change: fn(&mut ReportField, String),
) -> impl Fn(leptos::ev::Event) + 'static {
    move |ev| {
        let value = event_target_value(&ev);
        screen.edit_draft(|d| {
            if let Some(field) = d.report_fields.get_mut(idx) {
                change(field, value);
            }
        });
    }
}

fn non_blank(value: String) -> Option<String> {
    Some(value).filter(|s| !s.trim().is_empty())
}
