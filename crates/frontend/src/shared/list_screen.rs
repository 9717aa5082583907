//! Reactive glue between a [`ListController`] and a Leptos screen.
//!
//! The controller lives in an `RwSignal`; every async step releases the
//! signal before awaiting and re-acquires it with `try_update`, so a result
//! arriving after the screen unmounted is silently dropped.

use crate::shared::components::{ConfirmDialog, FeedbackPopup};
use crate::shared::icons::icon;
use crate::shared::list_pattern::controller::ListController;
use crate::shared::list_pattern::record::DraftForm;
use crate::shared::list_pattern::remote::{HttpCollection, RemoteCollection};
use crate::shared::list_pattern::view::{GroupedView, StatusFilter};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use thaw::*;

pub struct ListScreen<D: DraftForm> {
    state: RwSignal<ListController<D>>,
    client: StoredValue<HttpCollection<D>>,
}

impl<D: DraftForm> Clone for ListScreen<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: DraftForm> Copy for ListScreen<D> {}

impl<D: DraftForm> ListScreen<D>
where
    D::Record: DeserializeOwned,
{
    pub fn new(client: HttpCollection<D>) -> Self {
        Self {
            state: RwSignal::new(ListController::new()),
            client: StoredValue::new(client),
        }
    }

    pub fn state(&self) -> RwSignal<ListController<D>> {
        self.state
    }

    /// Tracked read of the controller
    pub fn with<R>(&self, f: impl FnOnce(&ListController<D>) -> R) -> R {
        self.state.with(f)
    }

    pub fn update(&self, f: impl FnOnce(&mut ListController<D>)) {
        self.state.update(f);
    }

    pub fn client(&self) -> HttpCollection<D> {
        self.client.get_value()
    }

    /// Memoized grouped view; recomputed when the mirror or filter change
    pub fn grouped_view(&self) -> Memo<GroupedView<D::Record>> {
        let state = self.state;
        Memo::new(move |_| state.with(|c| c.view()))
    }

    /// Reactive read of one draft field, default while no form is open
    pub fn draft_field<T>(&self, read: fn(&D) -> T) -> Signal<T>
    where
        T: Default + Clone + Send + Sync + 'static,
    {
        let state = self.state;
        Signal::derive(move || {
            state.with(|c| c.editor().draft().map(|d| read(&d.fields)).unwrap_or_default())
        })
    }

    pub fn edit_draft(&self, change: impl FnOnce(&mut D)) {
        self.state.update(|c| c.on_field_change(change));
    }

    pub fn is_creating(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || {
            state.with(|c| c.editor().draft().is_some_and(|d| d.mode.is_create()))
        })
    }

    pub fn is_saving(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|c| c.editor().is_submitting()))
    }

    pub fn editor_error(&self) -> Signal<Option<String>> {
        let state = self.state;
        Signal::derive(move || state.with(|c| c.editor().error().map(str::to_string)))
    }

    /// Triggers outside the rows (New, Add from catalog) use this
    pub fn is_busy(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|c| c.workflow().is_busy()))
    }

    pub fn row_blocked(&self, id: String) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|c| c.is_row_action_blocked(&id)))
    }

    pub fn open_create(&self) {
        self.state.update(|c| c.open_create());
    }

    pub fn open_create_with(&self, fields: D) {
        self.state.update(|c| c.open_create_with(fields));
    }

    pub fn open_edit(&self, id: &str) {
        self.state.update(|c| {
            if let Err(e) = c.open_edit(id) {
                log::warn!("edit ignored: {}", e);
            }
        });
    }

    pub fn close_editor(&self) {
        self.state.update(|c| c.close_editor());
    }

    pub fn request_delete(&self, id: &str) {
        self.state.update(|c| {
            if let Err(e) = c.request_delete(id) {
                log::debug!("delete request ignored: {}", e);
            }
        });
    }

    pub fn request_set_active(&self, id: &str, active: bool) {
        self.state.update(|c| {
            if let Err(e) = c.request_set_active(id, active) {
                log::debug!("status request ignored: {}", e);
            }
        });
    }

    pub fn set_search_text(&self, text: String) {
        self.state.update(|c| c.set_search_text(text));
    }

    pub fn set_status_filter(&self, status: StatusFilter) {
        self.state.update(|c| c.set_status_filter(status));
    }

    pub fn set_category_filter(&self, category: Option<String>) {
        self.state.update(|c| c.set_category_filter(category));
    }

    pub fn reset_filter(&self) {
        self.state.update(|c| c.reset_filter());
    }

    /// Fetches the collection and replaces the mirror
    pub fn reload(&self) {
        let started = self.state.try_update(|c| c.begin_load()).unwrap_or(false);
        if !started {
            return;
        }
        let state = self.state;
        let client = self.client();
        spawn_local(async move {
            let result = client.list().await;
            state.try_update(|c| c.finish_load(result));
        });
    }

    /// Executes the action behind the open confirmation dialog
    pub fn confirm_pending(&self) {
        let submission = match self.state.try_update(|c| c.begin_action()) {
            Some(Ok(submission)) => submission,
            Some(Err(e)) => {
                log::debug!("confirm ignored: {}", e);
                return;
            }
            None => return,
        };
        let screen = *self;
        let client = self.client();
        spawn_local(async move {
            let result = submission.execute(&client).await;
            let refresh = screen.state.try_update(|c| {
                c.settle_action(submission, result);
                c.take_refresh_request()
            });
            if refresh == Some(true) {
                screen.reload();
            }
        });
    }

    /// Validates and saves the open form
    pub fn submit_form(&self) {
        let submission = match self.state.try_update(|c| c.begin_submit()) {
            Some(Ok(submission)) => submission,
            Some(Err(e)) => {
                log::debug!("submit rejected: {}", e);
                return;
            }
            None => return,
        };
        let screen = *self;
        let client = self.client();
        spawn_local(async move {
            let result = submission.execute(&client).await;
            let refresh = screen.state.try_update(|c| {
                c.settle_submit(submission, result);
                c.take_refresh_request()
            });
            if refresh == Some(true) {
                screen.reload();
            }
        });
    }
}

/// Confirmation dialog and outcome popup of one screen
#[component]
pub fn ScreenOverlays<D>(screen: ListScreen<D>) -> impl IntoView
where
    D: DraftForm,
    D::Record: DeserializeOwned,
{
    let state = screen.state();
    let pending = Signal::derive(move || state.with(|c| c.workflow().pending().cloned()));
    let submitting = Signal::derive(move || state.with(|c| c.workflow().is_submitting()));
    let feedback = Signal::derive(move || {
        state.with(|c| c.workflow().feedback().map(|(seq, f)| (seq, f.clone())))
    });

    view! {
        <ConfirmDialog
            pending=pending
            submitting=submitting
            on_confirm=Callback::new(move |_| screen.confirm_pending())
            on_cancel=Callback::new(move |_| {
                state.update(|c| {
                    c.cancel_pending();
                })
            })
        />
        <FeedbackPopup
            feedback=feedback
            on_dismiss=Callback::new(move |_| {
                state.update(|c| {
                    c.dismiss_feedback();
                })
            })
            on_timeout=Callback::new(move |seq: u64| {
                state.try_update(|c| c.dismiss_feedback_if_current(seq));
            })
        />
    }
}

/// Spinner, load error with retry, or the empty-state message
#[component]
pub fn LoadStatus<D>(
    screen: ListScreen<D>,
    /// Records passing the current filter
    #[prop(into)]
    matched: Signal<usize>,
    #[prop(into)] empty_message: String,
) -> impl IntoView
where
    D: DraftForm,
    D::Record: DeserializeOwned,
{
    let state = screen.state();

    move || {
        let (loading, loaded, error, total) = state.with(|c| {
            (
                c.is_loading(),
                c.is_loaded(),
                c.load_error().map(str::to_string),
                c.mirror().len(),
            )
        });
        let matched = matched.get();

        if let Some(e) = error {
            view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| screen.reload()
                    >
                        {icon("refresh")}
                        " Retry"
                    </Button>
                </div>
            }
            .into_any()
        } else if loading && !loaded {
            view! {
                <div class="page__loading">
                    <Spinner />
                    <span>{format!("Loading {}...", D::Record::list_name().to_lowercase())}</span>
                </div>
            }
            .into_any()
        } else if loaded && total == 0 {
            view! { <div class="page__empty">{empty_message.clone()}</div> }.into_any()
        } else if loaded && matched == 0 {
            view! { <div class="page__empty">"Nothing matches the current filters."</div> }
                .into_any()
        } else {
            ().into_any()
        }
    }
}
