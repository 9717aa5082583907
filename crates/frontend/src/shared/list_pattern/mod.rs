//! List-management pattern shared by every CRUD screen:
//! filter/search/group over a local mirror, modal editing and a
//! confirmation workflow in front of destructive actions.

pub mod controller;
pub mod editor;
pub mod error;
pub mod mirror;
pub mod record;
pub mod remote;
pub mod view;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{ListController, ListError};
pub use editor::{Draft, DraftMode};
pub use error::ApiError;
pub use record::{DraftForm, Grouping, ListRecord};
pub use remote::{EditMethod, HttpCollection, RemoteCollection, ResourceEndpoint};
pub use view::{GroupedView, StatusFilter, ViewFilter, ViewStats};
pub use workflow::{ActionKind, Feedback, FeedbackKind, WorkflowState};
