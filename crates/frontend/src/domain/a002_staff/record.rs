//! Staff accounts in the list pattern: one flat list, searchable by name,
//! username, email and phone.

use crate::shared::api_utils::ApiConfig;
use crate::shared::list_pattern::editor::DraftMode;
use crate::shared::list_pattern::record::{DraftForm, ListRecord};
use crate::shared::list_pattern::remote::{EditMethod, HttpCollection, ResourceEndpoint};
use contracts::domain::a002_staff::aggregate::{Staff, StaffDto};

pub const ENDPOINT: ResourceEndpoint =
    ResourceEndpoint::new("staff").with_edit_method(EditMethod::Patch);

/// (value, label) of the roles offered by the form
pub const ROLES: [(&str, &str); 4] = [
    ("admin", "Administrator"),
    ("receptionist", "Receptionist"),
    ("technician", "Lab technician"),
    ("accountant", "Accountant"),
];

pub fn role_label(role: &str) -> &str {
    ROLES
        .iter()
        .find(|(value, _)| *value == role)
        .map(|(_, label)| *label)
        .unwrap_or(role)
}

pub fn collection(config: ApiConfig) -> HttpCollection<StaffDto> {
    HttpCollection::new(ENDPOINT, config)
}

impl ListRecord for Staff {
    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    fn search_fields(&self) -> Vec<&str> {
        [Some(self.name.as_str()), Some(self.username.as_str()), self.email.as_deref(), self.phone.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}

impl DraftForm for StaffDto {
    type Record = Staff;

    fn from_record(record: &Staff) -> Self {
        StaffDto::from_staff(record)
    }

    fn into_record(self, id: String, is_active: bool) -> Staff {
        self.into_staff(id, is_active)
    }

    /// The password is mandatory only for new accounts
    fn validate(&self, mode: &DraftMode) -> Result<(), String> {
        StaffDto::validate(self, mode.is_create())
    }
}
