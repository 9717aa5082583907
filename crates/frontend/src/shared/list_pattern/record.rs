//! Traits that plug a domain aggregate into the list-management pattern

use super::editor::DraftMode;
use contracts::domain::common::AggregateRoot;
use serde::Serialize;
use std::fmt::Debug;

/// How a list screen arranges its groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// One group holding everything
    None,
    /// Groups in the order their key is first seen in the mirror
    FirstSeen,
    /// Groups sorted by label, the fallback bucket always last
    Alphabetical,
}

/// A record mirrored from a remote collection
pub trait ListRecord: AggregateRoot + Clone + PartialEq + Debug + Send + Sync + 'static {
    const GROUPING: Grouping = Grouping::None;

    /// Flip `is_active` in place (used for the activate/deactivate echo)
    fn set_active(&mut self, active: bool);

    /// Values matched by the search box
    fn search_fields(&self) -> Vec<&str>;

    /// Online/offline report flag, for domains that have one
    fn online_flag(&self) -> Option<bool> {
        None
    }

    /// Key compared against the category filter
    fn category_key(&self) -> Option<&str> {
        None
    }

    /// Group identity; `None` lands in the fallback bucket
    fn group_key(&self) -> Option<&str> {
        None
    }

    /// Header shown for the record's group, defaults to the key
    fn group_label(&self) -> Option<&str> {
        self.group_key()
    }
}

/// Editable form bound to a record type
pub trait DraftForm:
    Clone + Default + PartialEq + Debug + Serialize + Send + Sync + 'static
{
    type Record: ListRecord;

    fn from_record(record: &Self::Record) -> Self;

    /// Record echoed into the mirror after the backend accepted the form
    fn into_record(self, id: String, is_active: bool) -> Self::Record;

    /// First failing rule, required fields before range checks
    fn validate(&self, mode: &DraftMode) -> Result<(), String>;
}
