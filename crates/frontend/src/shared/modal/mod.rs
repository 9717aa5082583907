use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;
use thaw::*;

/// Editor modal: header with title, form body, error line and Save/Cancel.
///
/// Escape and overlay clicks close it unless a save is in flight.
#[component]
pub fn Modal(
    #[prop(into)] title: Signal<String>,
    on_close: Callback<()>,
    on_save: Callback<()>,
    /// Error of the last save or validation attempt, shown above the buttons
    #[prop(into)]
    error: Signal<Option<String>>,
    #[prop(into)] saving: Signal<bool>,
    #[prop(optional, into)] save_label: Option<String>,
    children: Children,
) -> impl IntoView {
    let close = move || {
        if !saving.get_untracked() {
            on_close.run(());
        }
    };

    let handle = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            close();
        }
    });
    on_cleanup(move || handle.remove());

    let save_label = save_label.unwrap_or_else(|| "Save".to_string());

    view! {
        <div class="modal-overlay" on:click=move |_| close()>
            <div class="modal" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{move || title.get()}</h2>
                    <button class="button button--icon modal__close" on:click=move |_| close()>
                        {icon("x")}
                    </button>
                </div>
                <form
                    class="modal-body"
                    on:submit=move |ev: ev::SubmitEvent| {
                        ev.prevent_default();
                        on_save.run(());
                    }
                >
                    {children()}
                </form>
                {move || error.get().map(|e| view! {
                    <div class="modal-error" role="alert">{e}</div>
                })}
                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=saving
                        on_click=move |_| close()
                    >
                        "Cancel"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        loading=saving
                        disabled=saving
                        on_click=move |_| on_save.run(())
                    >
                        {save_label}
                    </Button>
                </div>
            </div>
        </div>
    }
}
