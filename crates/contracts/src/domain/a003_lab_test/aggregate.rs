use crate::domain::common::category_ref::{self, CategoryRef};
use crate::domain::common::AggregateRoot;
use crate::shared::validation::{validate_fields, FieldCheck, ValidationRules};
use serde::{Deserialize, Serialize};

// ============================================================================
// Report format
// ============================================================================

/// Whether results are entered online (structured schema) or attached offline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Online,
    Offline,
}

impl ReportFormat {
    pub fn label(&self) -> &'static str {
        match self {
            ReportFormat::Online => "Online",
            ReportFormat::Offline => "Offline",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Online => "online",
            ReportFormat::Offline => "offline",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "offline" => ReportFormat::Offline,
            _ => ReportFormat::Online,
        }
    }
}

/// One row of the online report schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportField {
    pub name: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub reference_range: Option<String>,
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Test offered by the lab, with its price and report schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabTest {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "category_ref::deserialize_optional")]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub report_format: ReportFormat,
    #[serde(default)]
    pub report_fields: Vec<ReportField>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl LabTest {
    pub fn is_online(&self) -> bool {
        self.report_format == ReportFormat::Online
    }

    pub fn category_id(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.id.as_str())
    }

    pub fn category_label(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.label())
    }
}

impl AggregateRoot for LabTest {
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
        "a003"
    }

    fn collection_name() -> &'static str {
        "lab-tests"
    }

    fn element_name() -> &'static str {
        "Lab test"
    }

    fn list_name() -> &'static str {
        "Lab tests"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for creating/updating a lab test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LabTestDto {
    pub name: String,
    pub code: Option<String>,
    /// Category id (sent as `category`)
    #[serde(rename = "category")]
    pub category_id: String,
    /// Not sent; kept so the mirror can group an echoed record by name
    #[serde(skip)]
    pub category_name: Option<String>,
    pub price: f64,
    pub report_format: ReportFormat,
    pub report_fields: Vec<ReportField>,
}

impl LabTestDto {
    pub fn from_lab_test(t: &LabTest) -> Self {
        Self {
            name: t.name.clone(),
            code: t.code.clone(),
            category_id: t.category.as_ref().map(|c| c.id.clone()).unwrap_or_default(),
            category_name: t.category.as_ref().and_then(|c| c.name.clone()),
            price: t.price,
            report_format: t.report_format,
            report_fields: t.report_fields.clone(),
        }
    }

    pub fn into_lab_test(self, id: String, is_active: bool) -> LabTest {
        let category = if self.category_id.trim().is_empty() {
            None
        } else {
            Some(CategoryRef {
                id: self.category_id,
                name: self.category_name,
            })
        };
        LabTest {
            id,
            name: self.name,
            code: self.code.filter(|c| !c.trim().is_empty()),
            category,
            price: self.price,
            report_format: self.report_format,
            report_fields: self.report_fields,
            is_active,
        }
    }

    pub fn field_checks(&self) -> Vec<FieldCheck<'_>> {
        let mut checks = vec![
            FieldCheck::text("Name", &self.name, ValidationRules::required()),
            FieldCheck::text("Category", &self.category_id, ValidationRules::required()),
        ];
        // Offline tests carry an attached report; their schema is ignored
        if self.report_format == ReportFormat::Online {
            for (idx, field) in self.report_fields.iter().enumerate() {
                checks.push(FieldCheck::text(
                    format!("Report field #{} name", idx + 1),
                    &field.name,
                    ValidationRules::required(),
                ));
            }
        }
        checks.push(FieldCheck::number(
            "Price",
            self.price,
            ValidationRules::non_negative(),
        ));
        checks
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_fields(&self.field_checks())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_accepts_both_shapes() {
        let plain: LabTest =
            serde_json::from_str(r#"{"_id":"t1","name":"CBC","category":"c1","price":300}"#)
                .unwrap();
        assert_eq!(plain.category_id(), Some("c1"));
        assert_eq!(plain.category_label(), Some("c1"));

        let populated: LabTest = serde_json::from_str(
            r#"{"_id":"t2","name":"ESR","category":{"_id":"c1","name":"Hematology"},"reportFormat":"offline"}"#,
        )
        .unwrap();
        assert_eq!(populated.category_id(), Some("c1"));
        assert_eq!(populated.category_label(), Some("Hematology"));
        assert!(!populated.is_online());
    }

    #[test]
    fn test_dto_sends_bare_category_id() {
        let dto = LabTestDto {
            name: "CBC".into(),
            category_id: "c1".into(),
            category_name: Some("Hematology".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["category"], "c1");
        assert!(json.get("categoryName").is_none());
    }

    #[test]
    fn test_validation_order() {
        let mut dto = LabTestDto {
            name: "CBC".into(),
            price: -5.0,
            report_fields: vec![ReportField::default()],
            ..Default::default()
        };
        assert_eq!(dto.validate(), Err("Category is required".to_string()));
        dto.category_id = "c1".into();
        assert_eq!(
            dto.validate(),
            Err("Report field #1 name is required".to_string())
        );
        dto.report_fields[0].name = "Hemoglobin".into();
        assert_eq!(dto.validate(), Err("Price must be at least 0".to_string()));
        dto.price = 0.0;
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_offline_schema_is_not_validated() {
        let dto = LabTestDto {
            name: "Biopsy".into(),
            category_id: "c9".into(),
            report_format: ReportFormat::Offline,
            report_fields: vec![ReportField::default()],
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_echoed_record_keeps_category_name() {
        let dto = LabTestDto {
            name: "CBC".into(),
            category_id: "c1".into(),
            category_name: Some("Hematology".into()),
            ..Default::default()
        };
        let t = dto.into_lab_test("t1".into(), true);
        assert_eq!(t.category_label(), Some("Hematology"));
    }
}
