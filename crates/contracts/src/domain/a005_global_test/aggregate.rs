use crate::domain::a003_lab_test::aggregate::{LabTestDto, ReportField, ReportFormat};
use crate::domain::common::category_ref::{self, CategoryRef};
use serde::{Deserialize, Serialize};

/// Entry of the shared (read-only) test catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalTest {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "category_ref::deserialize_optional")]
    pub category: Option<CategoryRef>,
    #[serde(default, alias = "price")]
    pub default_price: f64,
    #[serde(default)]
    pub report_format: ReportFormat,
    #[serde(default)]
    pub report_fields: Vec<ReportField>,
}

impl GlobalTest {
    pub fn collection_name() -> &'static str {
        "global-tests"
    }

    pub fn category_id(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.id.as_str())
    }

    /// Template for adding this catalog entry to the lab's own menu
    pub fn to_lab_test_dto(&self) -> LabTestDto {
        LabTestDto {
            name: self.name.clone(),
            code: self.code.clone(),
            category_id: self.category.as_ref().map(|c| c.id.clone()).unwrap_or_default(),
            category_name: self.category.as_ref().and_then(|c| c.name.clone()),
            price: self.default_price,
            report_format: self.report_format,
            report_fields: self.report_fields.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_copies_catalog_values() {
        let g: GlobalTest = serde_json::from_str(
            r#"{"_id":"g1","name":"Lipid profile","code":"LIP","category":{"_id":"c2","name":"Biochemistry"},"price":900}"#,
        )
        .unwrap();
        let dto = g.to_lab_test_dto();
        assert_eq!(dto.name, "Lipid profile");
        assert_eq!(dto.category_id, "c2");
        assert_eq!(dto.category_name.as_deref(), Some("Biochemistry"));
        assert_eq!(dto.price, 900.0);
    }
}
