//! Create/edit form of a referrer, rendered as a modal over the list

use crate::shared::components::{NumberField, SelectField, TextField};
use crate::shared::list_screen::ListScreen;
use crate::shared::modal::Modal;
use contracts::domain::a001_referrer::aggregate::{CommissionType, ReferrerDto, ReferrerKind};
use leptos::prelude::*;

#[component]
pub fn ReferrerDetails(screen: ListScreen<ReferrerDto>) -> impl IntoView {
    let state = screen.state();
    let is_open = Signal::derive(move || state.with(|c| c.editor().is_open()));
    let creating = screen.is_creating();
    let saving = screen.is_saving();

    let kind_options = Signal::stored(
        [ReferrerKind::Doctor, ReferrerKind::Agent]
            .iter()
            .map(|k| (k.as_str().to_string(), k.label().to_string()))
            .collect::<Vec<_>>(),
    );
    let commission_options = Signal::stored(
        [CommissionType::Percentage, CommissionType::Fixed]
            .iter()
            .map(|t| (t.as_str().to_string(), t.label().to_string()))
            .collect::<Vec<_>>(),
    );
    let commission_type = screen.draft_field(|d| d.commission_type);
    let commission_label = Signal::derive(move || {
        match commission_type.get() {
            CommissionType::Percentage => "Commission (%)".to_string(),
            CommissionType::Fixed => "Commission (amount)".to_string(),
        }
    });

    view! {
        <Show when=move || is_open.get()>
            <Modal
                title=Signal::derive(move || {
                    if creating.get() { "New referrer" } else { "Edit referrer" }.to_string()
                })
                on_close=Callback::new(move |_| screen.close_editor())
                on_save=Callback::new(move |_| screen.submit_form())
                error=screen.editor_error()
                saving=saving
                save_label=if creating.get_untracked() { "Create" } else { "Save" }
            >
                <TextField
                    label="Name"
                    required=true
                    value=screen.draft_field(|d| d.name.clone())
                    on_input=Callback::new(move |v: String| screen.edit_draft(|d| d.name = v))
                    disabled=saving
                />
                <TextField
                    label="Contact"
                    required=true
                    input_type="tel"
                    value=screen.draft_field(|d| d.contact.clone())
                    on_input=Callback::new(move |v: String| screen.edit_draft(|d| d.contact = v))
                    disabled=saving
                />
                <TextField
                    label="Email"
                    input_type="email"
                    value=screen.draft_field(|d| d.email.clone().unwrap_or_default())
                    on_input=Callback::new(move |v: String| {
                        screen.edit_draft(|d| d.email = Some(v).filter(|e| !e.trim().is_empty()))
                    })
                    disabled=saving
                />
                <SelectField
                    label="Type"
                    value=screen.draft_field(|d| d.kind.as_str().to_string())
                    options=kind_options
                    on_change=Callback::new(move |v: String| {
                        screen.edit_draft(|d| d.kind = ReferrerKind::from_str_or_default(&v))
                    })
                    disabled=saving
                />
                <SelectField
                    label="Commission type"
                    value=screen.draft_field(|d| d.commission_type.as_str().to_string())
                    options=commission_options
                    on_change=Callback::new(move |v: String| {
                        screen.edit_draft(|d| {
                            d.commission_type = CommissionType::from_str_or_default(&v)
                        })
                    })
                    disabled=saving
                />
                {move || view! {
                    <NumberField
                        label=commission_label.get()
                        value=screen.draft_field(|d| d.commission_value)
                        on_input=Callback::new(move |v: f64| screen.edit_draft(|d| d.commission_value = v))
                        disabled=saving
                    />
                }}
            </Modal>
        </Show>
    }
}
