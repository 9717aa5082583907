//! Lab tests in the list pattern: grouped by category name (alphabetical,
//! uncategorized last), filterable by category and by online/offline report
//! format, searchable by name and code.

use crate::shared::api_utils::ApiConfig;
use crate::shared::list_pattern::editor::DraftMode;
use crate::shared::list_pattern::record::{DraftForm, Grouping, ListRecord};
use crate::shared::list_pattern::remote::{EditMethod, HttpCollection, ResourceEndpoint};
use crate::shared::list_pattern::view::{sort_groups_by_label, ViewGroup};
use contracts::domain::a003_lab_test::aggregate::{LabTest, LabTestDto};
use contracts::domain::a004_test_category::aggregate::TestCategory;

pub const ENDPOINT: ResourceEndpoint =
    ResourceEndpoint::new("lab-tests").with_edit_method(EditMethod::Put);

pub fn collection(config: ApiConfig) -> HttpCollection<LabTestDto> {
    HttpCollection::new(ENDPOINT, config)
}

impl ListRecord for LabTest {
    const GROUPING: Grouping = Grouping::Alphabetical;

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(code) = self.code.as_deref() {
            fields.push(code);
        }
        fields
    }

    fn online_flag(&self) -> Option<bool> {
        Some(self.is_online())
    }

    fn category_key(&self) -> Option<&str> {
        self.category_id()
    }

    fn group_key(&self) -> Option<&str> {
        self.category_id()
    }

    fn group_label(&self) -> Option<&str> {
        self.category_label()
    }
}

/// Renames category groups after the loaded test categories and restores
/// the alphabetical order, so records that arrived with a bare category id
/// sort under the category's name
pub fn name_category_groups(
    mut groups: Vec<ViewGroup<LabTest>>,
    categories: &[TestCategory],
) -> Vec<ViewGroup<LabTest>> {
    for group in &mut groups {
        let known = group
            .key
            .as_deref()
            .and_then(|key| categories.iter().find(|c| c.id == key))
            .filter(|c| !c.name.trim().is_empty());
        if let Some(category) = known {
            group.label = Some(category.name.clone());
        }
    }
    sort_groups_by_label(&mut groups);
    groups
}

impl DraftForm for LabTestDto {
    type Record = LabTest;

    fn from_record(record: &LabTest) -> Self {
        LabTestDto::from_lab_test(record)
    }

    fn into_record(self, id: String, is_active: bool) -> LabTest {
        self.into_lab_test(id, is_active)
    }

    fn validate(&self, _mode: &DraftMode) -> Result<(), String> {
        LabTestDto::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_pattern::view::{derive_view, StatusFilter, ViewFilter};
    use contracts::domain::a003_lab_test::aggregate::ReportFormat;
    use contracts::domain::common::CategoryRef;

    fn test(id: &str, name: &str, category: Option<CategoryRef>, format: ReportFormat) -> LabTest {
        LabTest {
            id: id.to_string(),
            name: name.to_string(),
            code: None,
            category,
            price: 250.0,
            report_format: format,
            report_fields: Vec::new(),
            is_active: true,
        }
    }

    fn menu() -> Vec<LabTest> {
        vec![
            test("1", "Urine routine", None, ReportFormat::Online),
            test("2", "Lipid profile", Some(CategoryRef::new("c-bio")), ReportFormat::Offline),
            test("3", "CBC", Some(CategoryRef::named("c-hem", "Hematology")), ReportFormat::Online),
            test("4", "ESR", Some(CategoryRef::named("c-hem", "Hematology")), ReportFormat::Online),
        ]
    }

    #[test]
    fn test_groups_sorted_with_uncategorized_last() {
        let view = derive_view(&menu(), &ViewFilter::default());
        let labels: Vec<&str> = view
            .groups
            .iter()
            .map(|g| g.label.as_deref().unwrap_or(""))
            .collect();
        assert_eq!(labels, vec!["c-bio", "Hematology", "Uncategorized"]);
        assert_eq!(view.groups[1].records.len(), 2);
    }

    #[test]
    fn test_online_filter_and_stats() {
        let filter = ViewFilter {
            status: StatusFilter::Offline,
            ..Default::default()
        };
        let view = derive_view(&menu(), &filter);
        assert_eq!(view.matched, 1);
        assert_eq!(view.stats.online, 3);
        assert_eq!(view.stats.offline, 1);
        assert_eq!(view.stats.total, 4);
    }

    #[test]
    fn test_category_filter_is_exact_id_match() {
        let filter = ViewFilter {
            category: Some("c-hem".into()),
            ..Default::default()
        };
        let view = derive_view(&menu(), &filter);
        let ids: Vec<&str> = view.records().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "4"]);

        let partial = ViewFilter {
            category: Some("c-he".into()),
            ..Default::default()
        };
        assert!(derive_view(&menu(), &partial).is_empty());
    }

    #[test]
    fn test_echo_keeps_category_name_for_grouping() {
        let dto = LabTestDto {
            name: "HbA1c".into(),
            category_id: "c-bio".into(),
            category_name: Some("Biochemistry".into()),
            price: 400.0,
            ..Default::default()
        };
        let record = dto.into_record("9".into(), true);
        assert_eq!(record.group_label(), Some("Biochemistry"));
        assert_eq!(record.group_key(), Some("c-bio"));
        assert_eq!(record.category_key(), Some("c-bio"));
    }

    fn mixed_shapes() -> Vec<LabTest> {
        vec![
            test("1", "Urine routine", Some(CategoryRef::new("c1")), ReportFormat::Online),
            test("2", "Lipid profile", Some(CategoryRef::new("c2")), ReportFormat::Online),
            test("3", "HbA1c", Some(CategoryRef::named("c2", "Biochemistry")), ReportFormat::Online),
        ]
    }

    fn group_summary(groups: &[ViewGroup<LabTest>]) -> Vec<(String, Vec<&str>)> {
        groups
            .iter()
            .map(|g| {
                (
                    g.label.clone().unwrap_or_default(),
                    g.records.iter().map(|t| t.id.as_str()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_bare_and_named_category_share_one_group() {
        let view = derive_view(&mixed_shapes(), &ViewFilter::default());
        assert_eq!(
            group_summary(&view.groups),
            vec![
                ("Biochemistry".to_string(), vec!["2", "3"]),
                ("c1".to_string(), vec!["1"]),
            ]
        );
    }

    #[test]
    fn test_loaded_categories_name_and_order_groups() {
        let categories = vec![
            TestCategory { id: "c1".into(), name: "Urine".into() },
            TestCategory { id: "c2".into(), name: "Biochemistry".into() },
        ];
        let mut records = mixed_shapes();
        records.push(test("4", "Culture", None, ReportFormat::Offline));
        records.push(test("5", "ESR", Some(CategoryRef::new("c9")), ReportFormat::Online));

        let view = derive_view(&records, &ViewFilter::default());
        let groups = name_category_groups(view.groups, &categories);
        assert_eq!(
            group_summary(&groups),
            vec![
                ("Biochemistry".to_string(), vec!["2", "3"]),
                ("c9".to_string(), vec!["5"]),
                ("Urine".to_string(), vec!["1"]),
                ("Uncategorized".to_string(), vec!["4"]),
            ]
        );
    }
}
