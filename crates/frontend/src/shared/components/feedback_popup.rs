use crate::shared::list_pattern::workflow::{Feedback, FEEDBACK_AUTO_DISMISS_MS};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Outcome popup of the confirmation workflow.
///
/// Auto-dismissing outcomes close after [`FEEDBACK_AUTO_DISMISS_MS`]; the
/// timer reports the sequence number it was armed for so a newer popup is
/// never closed by an older timer.
#[component]
pub fn FeedbackPopup(
    #[prop(into)] feedback: Signal<Option<(u64, Feedback)>>,
    on_dismiss: Callback<()>,
    on_timeout: Callback<u64>,
) -> impl IntoView {
    let mounted = Arc::new(AtomicBool::new(true));
    on_cleanup({
        let mounted = mounted.clone();
        move || mounted.store(false, Ordering::Relaxed)
    });

    Effect::new(move |_| {
        if let Some((seq, fb)) = feedback.get() {
            if fb.auto_dismiss {
                let mounted = mounted.clone();
                spawn_local(async move {
                    TimeoutFuture::new(FEEDBACK_AUTO_DISMISS_MS).await;
                    if mounted.load(Ordering::Relaxed) {
                        on_timeout.run(seq);
                    }
                });
            }
        }
    });

    move || {
        feedback.get().map(|(_, fb)| {
            let class = format!("feedback-popup feedback-popup--{}", fb.kind.css_modifier());
            view! {
                <div class="modal-overlay" on:click=move |_| on_dismiss.run(())>
                    <div class=class role="alert" on:click=|ev| ev.stop_propagation()>
                        <p class="feedback-popup__message">{fb.message}</p>
                        <button
                            class="button button--secondary feedback-popup__close"
                            on:click=move |_| on_dismiss.run(())
                        >
                            "OK"
                        </button>
                    </div>
                </div>
            }
        })
    }
}
