use crate::shared::list_pattern::workflow::PendingAction;
use leptos::prelude::*;
use thaw::*;

/// Confirmation popup for the action awaiting approval.
///
/// Buttons stay disabled while the confirmed action is being submitted.
#[component]
pub fn ConfirmDialog(
    #[prop(into)] pending: Signal<Option<PendingAction>>,
    #[prop(into)] submitting: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || pending.with(Option::is_some)>
            <div
                class="modal-overlay"
                on:click=move |_| {
                    if !submitting.get_untracked() {
                        on_cancel.run(());
                    }
                }
            >
                <div class="modal modal--confirm" on:click=|ev| ev.stop_propagation()>
                    <div class="modal-header">
                        <h2 class="modal-title">"Please confirm"</h2>
                    </div>
                    <div class="modal-body">
                        <p>{move || pending.get().map(|a| a.message).unwrap_or_default()}</p>
                    </div>
                    <div class="modal-footer">
                        <Button
                            appearance=ButtonAppearance::Secondary
                            disabled=submitting
                            on_click=move |_| on_cancel.run(())
                        >
                            "Cancel"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            loading=submitting
                            disabled=submitting
                            on_click=move |_| on_confirm.run(())
                        >
                            {move || {
                                pending
                                    .get()
                                    .map(|a| capitalize(a.kind.verb()))
                                    .unwrap_or_default()
                            }}
                        </Button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
