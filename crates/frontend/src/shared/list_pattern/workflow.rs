//! Confirmation/Feedback workflow
//!
//! One instance per screen. Gates destructive and state-changing actions
//! behind a confirmation step and holds the single outcome popup.
//!
//! ```text
//! idle ──request──▶ confirming ──confirm──▶ submitting ──complete──▶ feedback
//!   ▲                   │                                              │
//!   └─────cancel────────┘◀──────────────────dismiss────────────────────┘
//! ```

use thiserror::Error;

/// Delay before an auto-dismissing success popup closes itself
pub const FEEDBACK_AUTO_DISMISS_MS: u32 = 1_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Delete,
    Activate,
    Deactivate,
}

impl ActionKind {
    pub fn set_active(active: bool) -> Self {
        if active {
            ActionKind::Activate
        } else {
            ActionKind::Deactivate
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            ActionKind::Delete => "delete",
            ActionKind::Activate => "activate",
            ActionKind::Deactivate => "deactivate",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            ActionKind::Delete => "deleted",
            ActionKind::Activate => "activated",
            ActionKind::Deactivate => "deactivated",
        }
    }
}

/// Action awaiting the operator's confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction {
    pub kind: ActionKind,
    pub target_id: String,
    pub message: String,
}

impl PendingAction {
    /// "Are you sure you want to delete Dr. A?"
    pub fn new(kind: ActionKind, target_id: impl Into<String>, target_name: &str) -> Self {
        Self {
            kind,
            target_id: target_id.into(),
            message: format!("Are you sure you want to {} {}?", kind.verb(), target_name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Info,
    Error,
}

impl FeedbackKind {
    pub fn css_modifier(&self) -> &'static str {
        match self {
            FeedbackKind::Success => "success",
            FeedbackKind::Info => "info",
            FeedbackKind::Error => "error",
        }
    }
}

/// Outcome shown in the feedback popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
    pub auto_dismiss: bool,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            message: message.into(),
            auto_dismiss: false,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Info,
            message: message.into(),
            auto_dismiss: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Error,
            message: message.into(),
            auto_dismiss: false,
        }
    }

    /// Close without user interaction after [`FEEDBACK_AUTO_DISMISS_MS`]
    pub fn auto_dismissing(mut self) -> Self {
        self.auto_dismiss = self.kind == FeedbackKind::Success;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Confirming(PendingAction),
    Submitting(PendingAction),
    Feedback { seq: u64, feedback: Feedback },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("another action is already in progress")]
    Busy,

    #[error("there is no action awaiting confirmation")]
    NothingToConfirm,

    #[error("no action is being submitted")]
    NotSubmitting,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfirmationWorkflow {
    state: WorkflowState,
    seq: u64,
}

impl ConfirmationWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// Triggers must be disabled while this is true
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            WorkflowState::Confirming(_) | WorkflowState::Submitting(_)
        )
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, WorkflowState::Submitting(_))
    }

    /// Action behind the open confirmation dialog
    pub fn pending(&self) -> Option<&PendingAction> {
        match &self.state {
            WorkflowState::Confirming(a) | WorkflowState::Submitting(a) => Some(a),
            _ => None,
        }
    }

    pub fn feedback(&self) -> Option<(u64, &Feedback)> {
        match &self.state {
            WorkflowState::Feedback { seq, feedback } => Some((*seq, feedback)),
            _ => None,
        }
    }

    /// idle → confirming. An open feedback popup is replaced.
    pub fn request(&mut self, action: PendingAction) -> Result<(), WorkflowError> {
        if self.is_busy() {
            return Err(WorkflowError::Busy);
        }
        self.state = WorkflowState::Confirming(action);
        Ok(())
    }

    /// confirming → idle, no remote call
    pub fn cancel(&mut self) -> bool {
        if matches!(self.state, WorkflowState::Confirming(_)) {
            self.state = WorkflowState::Idle;
            true
        } else {
            false
        }
    }

    /// confirming → submitting; returns the action to execute
    pub fn confirm(&mut self) -> Result<PendingAction, WorkflowError> {
        match std::mem::take(&mut self.state) {
            WorkflowState::Confirming(action) => {
                self.state = WorkflowState::Submitting(action.clone());
                Ok(action)
            }
            other => {
                let busy = matches!(other, WorkflowState::Submitting(_));
                self.state = other;
                Err(if busy {
                    WorkflowError::Busy
                } else {
                    WorkflowError::NothingToConfirm
                })
            }
        }
    }

    /// submitting → feedback
    pub fn complete(&mut self, feedback: Feedback) -> Result<u64, WorkflowError> {
        if !self.is_submitting() {
            return Err(WorkflowError::NotSubmitting);
        }
        Ok(self.show(feedback))
    }

    /// idle/feedback → feedback, for outcomes that had no confirmation step
    pub fn report(&mut self, feedback: Feedback) -> Result<u64, WorkflowError> {
        if self.is_busy() {
            return Err(WorkflowError::Busy);
        }
        Ok(self.show(feedback))
    }

    fn show(&mut self, feedback: Feedback) -> u64 {
        self.seq += 1;
        self.state = WorkflowState::Feedback {
            seq: self.seq,
            feedback,
        };
        self.seq
    }

    /// feedback → idle
    pub fn dismiss(&mut self) -> bool {
        if matches!(self.state, WorkflowState::Feedback { .. }) {
            self.state = WorkflowState::Idle;
            true
        } else {
            false
        }
    }

    /// Timer-driven dismissal; ignored if a newer popup replaced this one
    pub fn dismiss_if_current(&mut self, seq: u64) -> bool {
        match &self.state {
            WorkflowState::Feedback { seq: current, .. } if *current == seq => self.dismiss(),
            _ => false,
        }
    }
}
