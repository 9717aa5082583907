//! Form/Modal editor: one draft at a time, validated before any remote call

use super::record::DraftForm;
use contracts::domain::common::AggregateRoot;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftMode {
    Create,
    /// `is_active` is carried so the echoed record keeps its status
    Edit { id: String, is_active: bool },
}

impl DraftMode {
    pub fn is_create(&self) -> bool {
        matches!(self, DraftMode::Create)
    }

    pub fn edit_id(&self) -> Option<&str> {
        match self {
            DraftMode::Create => None,
            DraftMode::Edit { id, .. } => Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Draft<D> {
    pub mode: DraftMode,
    pub fields: D,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("no form is open")]
    NoDraft,

    #[error("the form is already being saved")]
    Busy,

    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormEditor<D> {
    draft: Option<Draft<D>>,
    error: Option<String>,
    submitting: bool,
}

impl<D> Default for FormEditor<D> {
    fn default() -> Self {
        Self {
            draft: None,
            error: None,
            submitting: false,
        }
    }
}

impl<D: DraftForm> FormEditor<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> Option<&Draft<D>> {
        self.draft.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Blank template; replaces any open draft without warning
    pub fn open_create(&mut self) {
        self.open_create_with(D::default());
    }

    /// Create mode pre-filled from a template (e.g. a catalog entry)
    pub fn open_create_with(&mut self, fields: D) {
        self.open(Draft {
            mode: DraftMode::Create,
            fields,
        });
    }

    pub fn open_edit(&mut self, record: &D::Record) {
        self.open(Draft {
            mode: DraftMode::Edit {
                id: record.id().to_string(),
                is_active: record.is_active(),
            },
            fields: D::from_record(record),
        });
    }

    fn open(&mut self, draft: Draft<D>) {
        self.draft = Some(draft);
        self.error = None;
        self.submitting = false;
    }

    /// Closes and drops the draft; the next open starts from the template
    pub fn close(&mut self) {
        self.draft = None;
        self.error = None;
        self.submitting = false;
    }

    /// Shallow merge: the draft is replaced by an edited copy
    pub fn on_field_change(&mut self, change: impl FnOnce(&mut D)) {
        if self.submitting {
            return;
        }
        if let Some(draft) = &self.draft {
            let mut fields = draft.fields.clone();
            change(&mut fields);
            self.draft = Some(Draft {
                mode: draft.mode.clone(),
                fields,
            });
        }
    }

    /// Validates and marks the form as submitting
    pub fn begin_submit(&mut self) -> Result<Draft<D>, EditorError> {
        if self.submitting {
            return Err(EditorError::Busy);
        }
        let draft = self.draft.clone().ok_or(EditorError::NoDraft)?;
        if let Err(message) = draft.fields.validate(&draft.mode) {
            self.error = Some(message.clone());
            return Err(EditorError::Invalid(message));
        }
        self.error = None;
        self.submitting = true;
        Ok(draft)
    }

    pub fn finish_success(&mut self) {
        self.close();
    }

    /// Keeps the modal open with the error shown inside it
    pub fn finish_failure(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.error = Some(message.into());
    }
}
