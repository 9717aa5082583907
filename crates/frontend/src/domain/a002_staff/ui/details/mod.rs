//! Create/edit form of a staff account with its permission flags

use crate::domain::a002_staff::record::ROLES;
use crate::shared::components::{CheckboxField, SelectField, TextField};
use crate::shared::list_screen::ListScreen;
use crate::shared::modal::Modal;
use contracts::domain::a002_staff::aggregate::{StaffDto, StaffPermissions};
use leptos::prelude::*;

#[component]
pub fn StaffDetails(screen: ListScreen<StaffDto>) -> impl IntoView {
    let state = screen.state();
    let is_open = Signal::derive(move || state.with(|c| c.editor().is_open()));
    let creating = screen.is_creating();
    let saving = screen.is_saving();
    let permissions = screen.draft_field(|d| d.permissions);

    let role_options = Signal::stored(
        ROLES
            .iter()
            .map(|(value, label)| (value.to_string(), label.to_string()))
            .collect::<Vec<_>>(),
    );

    let optional = |v: String| Some(v).filter(|s| !s.trim().is_empty());

    view! {
        <Show when=move || is_open.get()>
            <Modal
                title=Signal::derive(move || {
                    if creating.get() { "New staff member" } else { "Edit staff member" }.to_string()
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
                    label="Username"
                    required=true
                    value=screen.draft_field(|d| d.username.clone())
                    on_input=Callback::new(move |v: String| screen.edit_draft(|d| d.username = v))
                    disabled=saving
                />
                <TextField
                    label="Email"
                    input_type="email"
                    value=screen.draft_field(|d| d.email.clone().unwrap_or_default())
                    on_input=Callback::new(move |v: String| screen.edit_draft(|d| d.email = optional(v)))
                    disabled=saving
                />
                <TextField
                    label="Phone"
                    input_type="tel"
                    value=screen.draft_field(|d| d.phone.clone().unwrap_or_default())
                    on_input=Callback::new(move |v: String| screen.edit_draft(|d| d.phone = optional(v)))
                    disabled=saving
                />
                <SelectField
                    label="Role"
                    value=screen.draft_field(|d| d.role.clone())
                    options=role_options
                    placeholder="Select role"
                    on_change=Callback::new(move |v: String| screen.edit_draft(|d| d.role = v))
                    disabled=saving
                />
                {move || {
                    let hint = if creating.get() {
                        "At least 6 characters"
                    } else {
                        "Leave empty to keep the current password"
                    };
                    view! {
                        <TextField
                            label="Password"
                            required=creating.get_untracked()
                            input_type="password"
                            placeholder=hint
                            value=screen.draft_field(|d| d.password.clone().unwrap_or_default())
                            on_input=Callback::new(move |v: String| {
                                screen.edit_draft(|d| d.password = optional(v))
                            })
                            disabled=saving
                        />
                    }
                }}

                <fieldset class="form__fieldset">
                    <legend class="form__legend">"Permissions"</legend>
                    {StaffPermissions::KEYS
                        .into_iter()
                        .map(|key| {
                            view! {
                                <CheckboxField
                                    label=StaffPermissions::label(key)
                                    checked=Signal::derive(move || permissions.get().get(key))
                                    on_change=Callback::new(move |granted: bool| {
                                        screen.edit_draft(|d| d.permissions.set(key, granted))
                                    })
                                    disabled=saving
                                />
                            }
                        })
                        .collect_view()}
                </fieldset>
            </Modal>
        </Show>
    }
}
