pub mod confirm_dialog;
pub mod feedback_popup;
pub mod filter_bar;
pub mod form_field;
pub mod page_header;
pub mod row_actions;
pub mod stats_bar;

pub use confirm_dialog::ConfirmDialog;
pub use feedback_popup::FeedbackPopup;
pub use filter_bar::FilterBar;
pub use form_field::{CheckboxField, NumberField, SelectField, TextField};
pub use page_header::PageHeader;
pub use row_actions::{RowActions, StatusBadge};
pub use stats_bar::StatsBar;
