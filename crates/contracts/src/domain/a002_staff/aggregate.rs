use crate::domain::common::AggregateRoot;
use crate::shared::validation::{validate_fields, FieldCheck, ValidationRules};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Permissions
// ============================================================================

/// Screens and operations a staff member may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StaffPermissions {
    pub billing: bool,
    pub invoices: bool,
    pub reports: bool,
    pub lab_tests: bool,
    pub referrers: bool,
    pub staff: bool,
}

impl StaffPermissions {
    /// Keys in display order
    pub const KEYS: [&'static str; 6] = [
        "billing",
        "invoices",
        "reports",
        "lab_tests",
        "referrers",
        "staff",
    ];

    pub fn label(key: &str) -> &'static str {
        match key {
            "billing" => "Billing",
            "invoices" => "Invoices",
            "reports" => "Reports",
            "lab_tests" => "Lab tests",
            "referrers" => "Referrers",
            "staff" => "Staff management",
            _ => "Unknown",
        }
    }

    pub fn get(&self, key: &str) -> bool {
        match key {
            "billing" => self.billing,
            "invoices" => self.invoices,
            "reports" => self.reports,
            "lab_tests" => self.lab_tests,
            "referrers" => self.referrers,
            "staff" => self.staff,
            _ => false,
        }
    }

    pub fn set(&mut self, key: &str, value: bool) {
        match key {
            "billing" => self.billing = value,
            "invoices" => self.invoices = value,
            "reports" => self.reports = value,
            "lab_tests" => self.lab_tests = value,
            "referrers" => self.referrers = value,
            "staff" => self.staff = value,
            _ => {}
        }
    }

    pub fn granted_count(&self) -> usize {
        Self::KEYS.iter().filter(|k| self.get(k)).count()
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Operator account of the lab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub permissions: StaffPermissions,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl AggregateRoot for Staff {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "staff"
    }

    fn element_name() -> &'static str {
        "Staff member"
    }

    fn list_name() -> &'static str {
        "Staff"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for creating/updating a staff account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StaffDto {
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: String,
    pub permissions: StaffPermissions,
    /// Only sent on create, or when an operator resets it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Not sent; carried so an edited record keeps its last login
    #[serde(skip)]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl StaffDto {
    pub fn from_staff(s: &Staff) -> Self {
        Self {
            name: s.name.clone(),
            username: s.username.clone(),
            email: s.email.clone(),
            phone: s.phone.clone(),
            role: s.role.clone(),
            permissions: s.permissions,
            password: None,
            last_login_at: s.last_login_at,
        }
    }

    pub fn into_staff(self, id: String, is_active: bool) -> Staff {
        Staff {
            id,
            name: self.name,
            username: self.username,
            email: self.email.filter(|e| !e.trim().is_empty()),
            phone: self.phone.filter(|p| !p.trim().is_empty()),
            role: self.role,
            permissions: self.permissions,
            is_active,
            last_login_at: self.last_login_at,
        }
    }

    pub fn field_checks(&self, creating: bool) -> Vec<FieldCheck<'_>> {
        let password_rules = if creating {
            ValidationRules::required().with_min_length(6)
        } else {
            ValidationRules::none().with_min_length(6)
        };
        vec![
            FieldCheck::text("Name", &self.name, ValidationRules::required()),
            FieldCheck::text(
                "Username",
                &self.username,
                ValidationRules::required().with_min_length(3),
            ),
            FieldCheck::text(
                "Password",
                self.password.as_deref().unwrap_or(""),
                password_rules,
            ),
        ]
    }

    /// Password is mandatory only when the account is being created
    pub fn validate(&self, creating: bool) -> Result<(), String> {
        validate_fields(&self.field_checks(creating))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissions_default_to_denied() {
        let raw = r#"{"_id":"s1","name":"Ann","username":"ann","permissions":{"billing":true}}"#;
        let s: Staff = serde_json::from_str(raw).unwrap();
        assert!(s.permissions.billing);
        assert!(!s.permissions.staff);
        assert_eq!(s.permissions.granted_count(), 1);
        assert!(s.is_active);
    }

    #[test]
    fn test_password_required_only_on_create() {
        let dto = StaffDto {
            name: "Ann".into(),
            username: "ann".into(),
            ..Default::default()
        };
        assert_eq!(dto.validate(true), Err("Password is required".to_string()));
        assert!(dto.validate(false).is_ok());
    }

    #[test]
    fn test_password_not_serialized_when_absent() {
        let json = serde_json::to_value(StaffDto::default()).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_permission_keys_roundtrip_through_accessors() {
        let mut p = StaffPermissions::default();
        for key in StaffPermissions::KEYS {
            p.set(key, true);
            assert!(p.get(key));
        }
        assert_eq!(p.granted_count(), StaffPermissions::KEYS.len());
    }
}
