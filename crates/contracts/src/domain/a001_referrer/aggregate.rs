use crate::domain::common::AggregateRoot;
use crate::shared::validation::{validate_fields, FieldCheck, ValidationRules};
use serde::{Deserialize, Serialize};

// ============================================================================
// Enums
// ============================================================================

/// Who sends the patient to the lab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReferrerKind {
    #[default]
    Doctor,
    Agent,
}

impl ReferrerKind {
    pub fn label(&self) -> &'static str {
        match self {
            ReferrerKind::Doctor => "Doctor",
            ReferrerKind::Agent => "Agent",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferrerKind::Doctor => "doctor",
            ReferrerKind::Agent => "agent",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "agent" => ReferrerKind::Agent,
            _ => ReferrerKind::Doctor,
        }
    }
}

/// How the referrer commission is computed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommissionType {
    #[default]
    Percentage,
    Fixed,
}

impl CommissionType {
    pub fn label(&self) -> &'static str {
        match self {
            CommissionType::Percentage => "Percentage",
            CommissionType::Fixed => "Fixed amount",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommissionType::Percentage => "percentage",
            CommissionType::Fixed => "fixed",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "fixed" => CommissionType::Fixed,
            _ => CommissionType::Percentage,
        }
    }

    /// "10%" or "150.00"
    pub fn format_value(&self, value: f64) -> String {
        match self {
            CommissionType::Percentage => format!("{}%", value),
            CommissionType::Fixed => format!("{:.2}", value),
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Doctor or agent who refers patients to the lab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referrer {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: ReferrerKind,
    #[serde(default)]
    pub commission_type: CommissionType,
    #[serde(default)]
    pub commission_value: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl AggregateRoot for Referrer {
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
        "a001"
    }

    fn collection_name() -> &'static str {
        "referrers"
    }

    fn element_name() -> &'static str {
        "Referrer"
    }

    fn list_name() -> &'static str {
        "Referrers"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for creating/updating a referrer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReferrerDto {
    pub name: String,
    pub contact: String,
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub kind: ReferrerKind,
    pub commission_type: CommissionType,
    pub commission_value: f64,
}

impl ReferrerDto {
    pub fn from_referrer(r: &Referrer) -> Self {
        Self {
            name: r.name.clone(),
            contact: r.contact.clone(),
            email: r.email.clone(),
            kind: r.kind,
            commission_type: r.commission_type,
            commission_value: r.commission_value,
        }
    }

    pub fn into_referrer(self, id: String, is_active: bool) -> Referrer {
        Referrer {
            id,
            name: self.name,
            contact: self.contact,
            email: self.email.filter(|e| !e.trim().is_empty()),
            kind: self.kind,
            commission_type: self.commission_type,
            commission_value: self.commission_value,
            is_active,
        }
    }

    pub fn field_checks(&self) -> Vec<FieldCheck<'_>> {
        let commission_rules = match self.commission_type {
            CommissionType::Percentage => ValidationRules::range(0.0, 100.0),
            CommissionType::Fixed => ValidationRules::non_negative(),
        };
        vec![
            FieldCheck::text("Name", &self.name, ValidationRules::required()),
            FieldCheck::text("Contact", &self.contact, ValidationRules::required()),
            FieldCheck::number("Commission", self.commission_value, commission_rules),
        ]
    }

    /// Validation: required fields first, then the commission range
    pub fn validate(&self) -> Result<(), String> {
        validate_fields(&self.field_checks())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(kind: CommissionType, value: f64) -> ReferrerDto {
        ReferrerDto {
            name: "Dr. A".into(),
            contact: "555-0101".into(),
            commission_type: kind,
            commission_value: value,
            ..Default::default()
        }
    }

    #[test]
    fn test_deserialize_backend_shape() {
        let raw = r#"{
            "_id": "1",
            "name": "Dr. A",
            "contact": "555-0101",
            "type": "agent",
            "commissionType": "fixed",
            "commissionValue": 250
        }"#;
        let r: Referrer = serde_json::from_str(raw).unwrap();
        assert_eq!(r.id, "1");
        assert_eq!(r.kind, ReferrerKind::Agent);
        assert_eq!(r.commission_type, CommissionType::Fixed);
        assert_eq!(r.commission_value, 250.0);
        assert!(r.is_active);
    }

    #[test]
    fn test_percentage_commission_bounds() {
        assert!(dto(CommissionType::Percentage, 0.0).validate().is_ok());
        assert!(dto(CommissionType::Percentage, 100.0).validate().is_ok());
        assert_eq!(
            dto(CommissionType::Percentage, 150.0).validate(),
            Err("Commission must be between 0 and 100".to_string())
        );
    }

    #[test]
    fn test_fixed_commission_is_unbounded_above() {
        assert!(dto(CommissionType::Fixed, 1500.0).validate().is_ok());
        assert!(dto(CommissionType::Fixed, -1.0).validate().is_err());
    }

    #[test]
    fn test_missing_name_reported_before_range() {
        let mut d = dto(CommissionType::Percentage, 150.0);
        d.name.clear();
        assert_eq!(d.validate(), Err("Name is required".to_string()));
    }
}
