//! Screen-level controller for the list-management pattern
//!
//! Owns the mirror, the filter, the confirmation workflow and the editor of
//! one list screen. Every remote mutation is split in two steps so the UI can
//! release its state between them while the request is in flight:
//!
//! 1. `begin_*` validates, claims the record in the mirror and returns a
//!    submission describing the remote call;
//! 2. `settle_*` takes the call's result, updates the mirror first and only
//!    then publishes the single feedback message.

use super::editor::{Draft, DraftMode, EditorError, FormEditor};
use super::error::ApiError;
use super::mirror::{MirrorError, MirrorOp, MirrorStore, MutationTicket};
use super::record::DraftForm;
use super::remote::RemoteCollection;
use super::view::{derive_view, GroupedView, StatusFilter, ViewFilter};
use super::workflow::{
    ActionKind, ConfirmationWorkflow, Feedback, PendingAction, WorkflowError,
};
use contracts::domain::common::AggregateRoot;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Mirror(#[from] MirrorError),

    #[error("record '{0}' is not in the list")]
    UnknownRecord(String),
}

/// Confirmed action on its way to the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSubmission {
    pub action: PendingAction,
    target_name: String,
    ticket: MutationTicket,
}

impl ActionSubmission {
    pub async fn execute<C: RemoteCollection + ?Sized>(&self, client: &C) -> Result<(), ApiError> {
        let id = &self.action.target_id;
        match self.action.kind {
            ActionKind::Delete => client.delete(id).await,
            ActionKind::Activate => client.set_active(id, true).await,
            ActionKind::Deactivate => client.set_active(id, false).await,
        }
    }
}

/// Validated draft on its way to the backend
#[derive(Debug, Clone, PartialEq)]
pub struct FormSubmission<D> {
    pub draft: Draft<D>,
    ticket: MutationTicket,
}

impl<D: DraftForm> FormSubmission<D> {
    /// Create returns the backend record; update echoes the draft locally
    pub async fn execute<C>(&self, client: &C) -> Result<D::Record, ApiError>
    where
        C: RemoteCollection<Draft = D> + ?Sized,
    {
        match &self.draft.mode {
            DraftMode::Create => client.create(&self.draft.fields).await,
            DraftMode::Edit { id, is_active } => {
                client.update(id, &self.draft.fields).await?;
                Ok(self.draft.fields.clone().into_record(id.clone(), *is_active))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListController<D: DraftForm> {
    mirror: MirrorStore<D::Record>,
    filter: ViewFilter,
    workflow: ConfirmationWorkflow,
    editor: FormEditor<D>,
    loading: bool,
    loaded: bool,
    load_error: Option<String>,
    refresh_requested: bool,
}

impl<D: DraftForm> Default for ListController<D> {
    fn default() -> Self {
        Self {
            mirror: MirrorStore::new(),
            filter: ViewFilter::default(),
            workflow: ConfirmationWorkflow::new(),
            editor: FormEditor::new(),
            loading: false,
            loaded: false,
            load_error: None,
            refresh_requested: false,
        }
    }
}

impl<D: DraftForm> ListController<D> {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn mirror(&self) -> &MirrorStore<D::Record> {
        &self.mirror
    }

    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    pub fn workflow(&self) -> &ConfirmationWorkflow {
        &self.workflow
    }

    pub fn editor(&self) -> &FormEditor<D> {
        &self.editor
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn view(&self) -> GroupedView<D::Record> {
        derive_view(self.mirror.records(), &self.filter)
    }

    /// Row actions are disabled while this is true
    pub fn is_row_action_blocked(&self, id: &str) -> bool {
        self.workflow.is_busy() || self.mirror.is_in_flight(id)
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// `false` when a load is already running
    pub fn begin_load(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.load_error = None;
        self.refresh_requested = false;
        true
    }

    pub fn finish_load(&mut self, result: Result<Vec<D::Record>, ApiError>) {
        self.loading = false;
        match result {
            Ok(records) => {
                log::debug!("{}: loaded {} records", D::Record::list_name(), records.len());
                self.mirror.replace_all(records);
                self.loaded = true;
            }
            Err(e) => {
                log::error!("{}: load failed: {}", D::Record::list_name(), e);
                self.load_error = Some(format!(
                    "Failed to load {}: {}",
                    D::Record::list_name().to_lowercase(),
                    e.user_message()
                ));
            }
        }
    }

    /// Set after an ambiguous outcome; the screen should re-run `list`
    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }

    // ------------------------------------------------------------------
    // Filter
    // ------------------------------------------------------------------

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.filter.search_text = text.into();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
    }

    pub fn set_category_filter(&mut self, category: Option<String>) {
        self.filter.category = category.filter(|c| !c.is_empty());
    }

    pub fn reset_filter(&mut self) {
        self.filter = ViewFilter::default();
    }

    // ------------------------------------------------------------------
    // Confirmation workflow
    // ------------------------------------------------------------------

    pub fn request_delete(&mut self, id: &str) -> Result<(), ListError> {
        self.request(ActionKind::Delete, id)
    }

    pub fn request_set_active(&mut self, id: &str, active: bool) -> Result<(), ListError> {
        self.request(ActionKind::set_active(active), id)
    }

    fn request(&mut self, kind: ActionKind, id: &str) -> Result<(), ListError> {
        let record = self
            .mirror
            .get(id)
            .ok_or_else(|| ListError::UnknownRecord(id.to_string()))?;
        let action = PendingAction::new(kind, id, record.display_name());
        self.workflow.request(action)?;
        Ok(())
    }

    pub fn cancel_pending(&mut self) -> bool {
        self.workflow.cancel()
    }

    /// confirming → submitting and claims the target in the mirror
    pub fn begin_action(&mut self) -> Result<ActionSubmission, ListError> {
        let action = self.workflow.confirm()?;
        let target_name = self
            .mirror
            .get(&action.target_id)
            .map(|r| r.display_name().to_string())
            .unwrap_or_else(|| action.target_id.clone());

        match self.mirror.begin(&action.target_id) {
            Ok(ticket) => Ok(ActionSubmission {
                action,
                target_name,
                ticket,
            }),
            Err(e) => {
                let _ = self.workflow.complete(Feedback::info(format!(
                    "{} is being updated right now. Try again in a moment.",
                    target_name
                )));
                Err(e.into())
            }
        }
    }

    pub fn settle_action(&mut self, submission: ActionSubmission, result: Result<(), ApiError>) {
        let ActionSubmission {
            action,
            target_name,
            ticket,
        } = submission;

        let feedback = match result {
            Ok(()) => {
                let op = match action.kind {
                    ActionKind::Delete => MirrorOp::Remove,
                    ActionKind::Activate => MirrorOp::SetActive(true),
                    ActionKind::Deactivate => MirrorOp::SetActive(false),
                };
                match self.mirror.commit(ticket, op) {
                    Ok(()) => Feedback::success(format!(
                        "{} was {}.",
                        target_name,
                        action.kind.past_tense()
                    ))
                    .auto_dismissing(),
                    Err(e) => self.stale_feedback(&target_name, e),
                }
            }
            Err(ApiError::NotFound) => {
                self.mirror.reconcile_missing(ticket);
                Feedback::info(format!(
                    "{} no longer exists and was removed from the list.",
                    target_name
                ))
            }
            Err(e) => {
                self.mirror.release(ticket);
                self.log_failure(action.kind.verb(), &target_name, &e);
                Feedback::error(format!(
                    "Could not {} {}. {}",
                    action.kind.verb(),
                    target_name,
                    e.user_message()
                ))
            }
        };

        if let Err(e) = self.workflow.complete(feedback) {
            log::warn!("feedback dropped: {}", e);
        }
    }

    pub fn dismiss_feedback(&mut self) -> bool {
        self.workflow.dismiss()
    }

    pub fn dismiss_feedback_if_current(&mut self, seq: u64) -> bool {
        self.workflow.dismiss_if_current(seq)
    }

    // ------------------------------------------------------------------
    // Editor
    // ------------------------------------------------------------------

    pub fn open_create(&mut self) {
        self.editor.open_create();
    }

    pub fn open_create_with(&mut self, fields: D) {
        self.editor.open_create_with(fields);
    }

    pub fn open_edit(&mut self, id: &str) -> Result<(), ListError> {
        let record = self
            .mirror
            .get(id)
            .ok_or_else(|| ListError::UnknownRecord(id.to_string()))?;
        self.editor.open_edit(record);
        Ok(())
    }

    pub fn close_editor(&mut self) {
        if !self.editor.is_submitting() {
            self.editor.close();
        }
    }

    pub fn on_field_change(&mut self, change: impl FnOnce(&mut D)) {
        self.editor.on_field_change(change);
    }

    /// Validation failures never reach the remote client
    pub fn begin_submit(&mut self) -> Result<FormSubmission<D>, ListError> {
        if self.workflow.is_busy() {
            return Err(WorkflowError::Busy.into());
        }
        let draft = self.editor.begin_submit()?;
        let ticket = match &draft.mode {
            DraftMode::Create => MutationTicket::for_create(),
            DraftMode::Edit { id, .. } => match self.mirror.begin(id) {
                Ok(ticket) => ticket,
                Err(e) => {
                    self.editor.finish_failure(
                        "This record is being updated right now. Try again in a moment.",
                    );
                    return Err(e.into());
                }
            },
        };
        Ok(FormSubmission { draft, ticket })
    }

    pub fn settle_submit(
        &mut self,
        submission: FormSubmission<D>,
        result: Result<D::Record, ApiError>,
    ) {
        let FormSubmission { draft, ticket } = submission;
        let creating = draft.mode.is_create();

        let feedback = match result {
            Ok(record) => {
                let name = record.display_name().to_string();
                self.editor.finish_success();
                match self.mirror.commit(ticket, MirrorOp::Upsert(record)) {
                    Ok(()) if creating => {
                        Feedback::success(format!("{} was added.", name)).auto_dismissing()
                    }
                    Ok(()) => Feedback::success(format!("{} was updated.", name)).auto_dismissing(),
                    Err(e) => self.stale_feedback(&name, e),
                }
            }
            Err(ApiError::NotFound) if !creating => {
                let name = self
                    .mirror
                    .reconcile_missing(ticket)
                    .map(|r| r.display_name().to_string())
                    .unwrap_or_else(|| D::Record::element_name().to_string());
                self.editor.close();
                Feedback::info(format!(
                    "{} no longer exists and was removed from the list.",
                    name
                ))
            }
            Err(e) => {
                self.mirror.release(ticket);
                let verb = if creating { "create" } else { "update" };
                self.log_failure(verb, D::Record::element_name(), &e);
                self.editor
                    .finish_failure(format!("Could not save: {}", e.user_message()));
                return;
            }
        };

        if let Err(e) = self.workflow.report(feedback) {
            log::warn!("feedback dropped: {}", e);
        }
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn stale_feedback(&mut self, name: &str, err: MirrorError) -> Feedback {
        log::warn!("{}: {}", D::Record::list_name(), err);
        self.refresh_requested = true;
        Feedback::info(format!(
            "{} changed while the request was in flight. The list is being refreshed.",
            name
        ))
    }

    fn log_failure(&mut self, verb: &str, name: &str, err: &ApiError) {
        match err {
            ApiError::Unknown(_) => {
                log::error!("{} {} failed: {}", verb, name, err);
                // The backend may or may not have applied it
                self.refresh_requested = true;
            }
            _ => log::warn!("{} {} failed: {}", verb, name, err),
        }
    }

    // ------------------------------------------------------------------
    // Whole flows, for callers that can hold the controller across awaits
    // ------------------------------------------------------------------

    pub async fn reload<C>(&mut self, client: &C)
    where
        C: RemoteCollection<Draft = D> + ?Sized,
    {
        if self.begin_load() {
            let result = client.list().await;
            self.finish_load(result);
        }
    }

    pub async fn confirm_pending<C>(&mut self, client: &C) -> Result<(), ListError>
    where
        C: RemoteCollection<Draft = D> + ?Sized,
    {
        let submission = self.begin_action()?;
        let result = submission.execute(client).await;
        self.settle_action(submission, result);
        Ok(())
    }

    pub async fn submit<C>(&mut self, client: &C) -> Result<(), ListError>
    where
        C: RemoteCollection<Draft = D> + ?Sized,
    {
        let submission = self.begin_submit()?;
        let result = submission.execute(client).await;
        self.settle_submit(submission, result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_pattern::testing::{item, FakeCollection, Item, ItemDraft};
    use crate::shared::list_pattern::workflow::{FeedbackKind, WorkflowState};
    use futures::executor::block_on;

    type Fake = FakeCollection<ItemDraft>;

    fn loaded(records: Vec<Item>) -> (ListController<ItemDraft>, Fake) {
        let client = Fake::new(records);
        let mut ctl = ListController::new();
        block_on(ctl.reload(&client));
        (ctl, client)
    }

    fn feedback_of(ctl: &ListController<ItemDraft>) -> Feedback {
        ctl.workflow()
            .feedback()
            .map(|(_, f)| f.clone())
            .expect("feedback shown")
    }

    fn ids(ctl: &ListController<ItemDraft>) -> Vec<&str> {
        ctl.mirror().records().iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_reload_fills_mirror() {
        let (ctl, client) = loaded(vec![item("1", "A"), item("2", "B")]);
        assert!(ctl.is_loaded());
        assert!(!ctl.is_loading());
        assert_eq!(ids(&ctl), vec!["1", "2"]);
        assert_eq!(client.calls(), vec!["list:"]);
    }

    #[test]
    fn test_failed_reload_keeps_previous_mirror() {
        let (mut ctl, client) = loaded(vec![item("1", "A")]);
        client.fail_next("list", ApiError::Network("offline".into()));
        block_on(ctl.reload(&client));
        assert_eq!(ids(&ctl), vec!["1"]);
        assert!(ctl.load_error().unwrap().starts_with("Failed to load items"));
    }

    #[test]
    fn test_delete_success_updates_mirror_before_feedback() {
        let (mut ctl, client) = loaded(vec![item("1", "A"), item("2", "B")]);
        ctl.request_delete("2").unwrap();
        assert_eq!(
            ctl.workflow().pending().unwrap().message,
            "Are you sure you want to delete B?"
        );
        assert!(ctl.is_row_action_blocked("1"));

        let submission = ctl.begin_action().unwrap();
        assert!(ctl.workflow().is_submitting());
        let result = block_on(submission.execute(&client));
        ctl.settle_action(submission, result);

        assert_eq!(ids(&ctl), vec!["1"]);
        let feedback = feedback_of(&ctl);
        assert_eq!(feedback.kind, FeedbackKind::Success);
        assert_eq!(feedback.message, "B was deleted.");
        assert!(feedback.auto_dismiss);
        assert!(!ctl.is_row_action_blocked("1"));
    }

    #[test]
    fn test_cancel_makes_no_remote_call() {
        let (mut ctl, client) = loaded(vec![item("1", "A")]);
        ctl.request_delete("1").unwrap();
        assert!(ctl.cancel_pending());
        assert_eq!(ctl.workflow().state(), &WorkflowState::Idle);
        assert_eq!(client.calls(), vec!["list:"]);
        assert_eq!(ids(&ctl), vec!["1"]);
    }

    #[test]
    fn test_delete_not_found_removes_once_with_info() {
        let (mut ctl, client) = loaded(vec![item("1", "A"), item("2", "B")]);
        // Someone else deleted it on the backend
        client.records.borrow_mut().retain(|r| r.id != "2");

        ctl.request_delete("2").unwrap();
        block_on(ctl.confirm_pending(&client)).unwrap();

        assert_eq!(ids(&ctl), vec!["1"]);
        let feedback = feedback_of(&ctl);
        assert_eq!(feedback.kind, FeedbackKind::Info);
        assert_eq!(
            feedback.message,
            "B no longer exists and was removed from the list."
        );
        assert!(!feedback.auto_dismiss);
        assert!(!ctl.take_refresh_request());
    }

    #[test]
    fn test_failed_action_leaves_mirror_unchanged() {
        let (mut ctl, client) = loaded(vec![item("1", "A")]);
        client.fail_next(
            "deactivate",
            ApiError::Validation("Referrer has open invoices".into()),
        );
        ctl.request_set_active("1", false).unwrap();
        block_on(ctl.confirm_pending(&client)).unwrap();

        assert!(ctl.mirror().get("1").unwrap().is_active);
        let feedback = feedback_of(&ctl);
        assert_eq!(feedback.kind, FeedbackKind::Error);
        assert_eq!(
            feedback.message,
            "Could not deactivate A. Referrer has open invoices"
        );
        assert!(!ctl.mirror().is_in_flight("1"));
    }

    #[test]
    fn test_unknown_error_requests_refresh() {
        let (mut ctl, client) = loaded(vec![item("1", "A")]);
        client.fail_next("delete", ApiError::Unknown("HTTP 500".into()));
        ctl.request_delete("1").unwrap();
        block_on(ctl.confirm_pending(&client)).unwrap();
        assert_eq!(ids(&ctl), vec!["1"]);
        assert!(ctl.take_refresh_request());
        assert!(!ctl.take_refresh_request());
    }

    #[test]
    fn test_activate_patches_in_place() {
        let mut inactive = item("2", "B");
        inactive.is_active = false;
        let (mut ctl, client) = loaded(vec![item("1", "A"), inactive]);
        ctl.request_set_active("2", true).unwrap();
        block_on(ctl.confirm_pending(&client)).unwrap();
        assert_eq!(ids(&ctl), vec!["1", "2"]);
        assert!(ctl.mirror().get("2").unwrap().is_active);
        assert_eq!(feedback_of(&ctl).message, "B was activated.");
        assert_eq!(client.calls(), vec!["list:", "activate:2"]);
    }

    #[test]
    fn test_second_request_rejected_while_confirming() {
        let (mut ctl, _client) = loaded(vec![item("1", "A"), item("2", "B")]);
        ctl.request_delete("1").unwrap();
        assert_eq!(
            ctl.request_delete("2"),
            Err(ListError::Workflow(WorkflowError::Busy))
        );
        assert_eq!(ctl.workflow().pending().unwrap().target_id, "1");
    }

    #[test]
    fn test_request_unknown_record() {
        let (mut ctl, _client) = loaded(vec![item("1", "A")]);
        assert_eq!(
            ctl.request_delete("9"),
            Err(ListError::UnknownRecord("9".into()))
        );
        assert_eq!(ctl.workflow().state(), &WorkflowState::Idle);
    }

    #[test]
    fn test_create_adds_record_and_reports() {
        let (mut ctl, client) = loaded(vec![item("1", "A")]);
        ctl.open_create();
        ctl.on_field_change(|d| d.name = "New".into());
        block_on(ctl.submit(&client)).unwrap();

        assert!(!ctl.editor().is_open());
        assert_eq!(ids(&ctl), vec!["1", "100"]);
        assert_eq!(feedback_of(&ctl).message, "New was added.");
        assert_eq!(client.calls(), vec!["list:", "create:"]);
    }

    #[test]
    fn test_invalid_submit_makes_no_remote_call() {
        let (mut ctl, client) = loaded(vec![]);
        ctl.open_create();
        ctl.on_field_change(|d| {
            d.name = "Over".into();
            d.share = 150.0;
        });
        let err = block_on(ctl.submit(&client)).unwrap_err();
        assert_eq!(
            err,
            ListError::Editor(EditorError::Invalid(
                "Share must be between 0 and 100".into()
            ))
        );
        assert!(ctl.editor().is_open());
        assert_eq!(client.calls(), vec!["list:"]);
        assert!(ctl.workflow().feedback().is_none());
    }

    #[test]
    fn test_update_replaces_in_place() {
        let (mut ctl, client) = loaded(vec![item("1", "A"), item("2", "B")]);
        ctl.open_edit("1").unwrap();
        ctl.on_field_change(|d| d.name = "A2".into());
        block_on(ctl.submit(&client)).unwrap();
        assert_eq!(ids(&ctl), vec!["1", "2"]);
        assert_eq!(ctl.mirror().get("1").unwrap().name, "A2");
        assert_eq!(feedback_of(&ctl).message, "A2 was updated.");
    }

    #[test]
    fn test_update_failure_keeps_modal_and_mirror() {
        let (mut ctl, client) = loaded(vec![item("1", "A")]);
        client.fail_next("update", ApiError::Validation("Name already used".into()));
        ctl.open_edit("1").unwrap();
        ctl.on_field_change(|d| d.name = "Dup".into());
        block_on(ctl.submit(&client)).unwrap();

        assert!(ctl.editor().is_open());
        assert_eq!(ctl.editor().error(), Some("Could not save: Name already used"));
        assert_eq!(ctl.mirror().get("1").unwrap().name, "A");
        assert!(ctl.workflow().feedback().is_none());
        assert!(!ctl.mirror().is_in_flight("1"));
    }

    #[test]
    fn test_update_not_found_closes_modal_and_removes() {
        let (mut ctl, client) = loaded(vec![item("1", "A")]);
        client.records.borrow_mut().clear();
        ctl.open_edit("1").unwrap();
        block_on(ctl.submit(&client)).unwrap();

        assert!(!ctl.editor().is_open());
        assert!(ctl.mirror().is_empty());
        assert_eq!(feedback_of(&ctl).kind, FeedbackKind::Info);
    }

    #[test]
    fn test_concurrent_edit_and_delete_never_resurrects() {
        let (mut ctl, client) = loaded(vec![item("1", "A")]);

        // Edit is in flight
        ctl.open_edit("1").unwrap();
        ctl.on_field_change(|d| d.name = "A2".into());
        let edit = ctl.begin_submit().unwrap();
        assert!(ctl.is_row_action_blocked("1"));

        // Delete on the same id cannot start while the edit is pending
        ctl.request_delete("1").unwrap();
        assert!(matches!(ctl.begin_action(), Err(ListError::Mirror(_))));
        assert_eq!(feedback_of(&ctl).kind, FeedbackKind::Info);

        // A reload lands before the edit's echo and the record is gone
        client.records.borrow_mut().clear();
        ctl.begin_load();
        let records = block_on(client.list());
        ctl.finish_load(records);
        assert!(ctl.mirror().is_empty());

        let result = Ok(edit.draft.fields.clone().into_record("1".into(), true));
        ctl.settle_submit(edit, result);
        assert!(ctl.mirror().is_empty());
        assert!(ctl.take_refresh_request());
    }

    #[test]
    fn test_submit_rejected_while_confirming() {
        let (mut ctl, _client) = loaded(vec![item("1", "A")]);
        ctl.request_delete("1").unwrap();
        ctl.open_create();
        ctl.on_field_change(|d| d.name = "New".into());
        assert_eq!(
            ctl.begin_submit(),
            Err(ListError::Workflow(WorkflowError::Busy))
        );
    }

    #[test]
    fn test_filter_changes_keep_stats() {
        let (mut ctl, _client) = loaded(vec![item("1", "Dr. A"), item("2", "Agent B")]);
        let before = ctl.view().stats;
        ctl.set_search_text("dr");
        let view = ctl.view();
        assert_eq!(view.stats, before);
        assert_eq!(view.records().count(), 1);
        ctl.reset_filter();
        assert!(ctl.filter().is_default());
    }
}
