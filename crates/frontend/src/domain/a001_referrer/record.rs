//! Referrers in the list pattern: grouped by kind (doctor/agent) in the order
//! the kinds first appear, searchable by name, contact and email.

use crate::shared::api_utils::ApiConfig;
use crate::shared::list_pattern::editor::DraftMode;
use crate::shared::list_pattern::record::{DraftForm, Grouping, ListRecord};
use crate::shared::list_pattern::remote::{EditMethod, HttpCollection, ResourceEndpoint};
use contracts::domain::a001_referrer::aggregate::{Referrer, ReferrerDto};

pub const ENDPOINT: ResourceEndpoint =
    ResourceEndpoint::new("referrers").with_edit_method(EditMethod::Put);

pub fn collection(config: ApiConfig) -> HttpCollection<ReferrerDto> {
    HttpCollection::new(ENDPOINT, config)
}

impl ListRecord for Referrer {
    const GROUPING: Grouping = Grouping::FirstSeen;

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.contact.as_str()];
        if let Some(email) = self.email.as_deref() {
            fields.push(email);
        }
        fields
    }

    fn group_key(&self) -> Option<&str> {
        Some(self.kind.label())
    }
}

impl DraftForm for ReferrerDto {
    type Record = Referrer;

    fn from_record(record: &Referrer) -> Self {
        ReferrerDto::from_referrer(record)
    }

    fn into_record(self, id: String, is_active: bool) -> Referrer {
        self.into_referrer(id, is_active)
    }

    fn validate(&self, _mode: &DraftMode) -> Result<(), String> {
        ReferrerDto::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_pattern::controller::{ListController, ListError};
    use crate::shared::list_pattern::editor::EditorError;
    use crate::shared::list_pattern::testing::FakeCollection;
    use crate::shared::list_pattern::view::ViewGroup;
    use contracts::domain::a001_referrer::aggregate::{CommissionType, ReferrerKind};
    use futures::executor::block_on;

    fn referrer(id: &str, name: &str, kind: ReferrerKind) -> Referrer {
        Referrer {
            id: id.to_string(),
            name: name.to_string(),
            contact: "555-0100".to_string(),
            email: None,
            kind,
            commission_type: CommissionType::Percentage,
            commission_value: 10.0,
            is_active: true,
        }
    }

    fn loaded(records: Vec<Referrer>) -> (ListController<ReferrerDto>, FakeCollection<ReferrerDto>) {
        let client = FakeCollection::new(records);
        let mut ctl = ListController::new();
        block_on(ctl.reload(&client));
        (ctl, client)
    }

    #[test]
    fn test_search_and_stats() {
        let (mut ctl, _client) = loaded(vec![referrer("1", "Dr. A", ReferrerKind::Doctor)]);

        ctl.set_search_text("dr");
        let view = ctl.view();
        assert_eq!(view.records().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["1"]);

        ctl.set_search_text("zz");
        let view = ctl.view();
        assert!(view.is_empty());
        assert_eq!(view.stats.total, 1);
        assert_eq!(view.stats.active, 1);
        assert_eq!(view.stats.inactive, 0);
    }

    #[test]
    fn test_search_matches_email() {
        let mut with_email = referrer("2", "Agent B", ReferrerKind::Agent);
        with_email.email = Some("b@clinic.example".into());
        let (mut ctl, _client) = loaded(vec![referrer("1", "Dr. A", ReferrerKind::Doctor), with_email]);
        ctl.set_search_text("CLINIC");
        assert_eq!(ctl.view().records().count(), 1);
    }

    #[test]
    fn test_percentage_out_of_range_is_not_sent() {
        let (mut ctl, client) = loaded(vec![]);
        ctl.open_create();
        ctl.on_field_change(|d| {
            d.name = "Dr. C".into();
            d.contact = "555".into();
            d.commission_type = CommissionType::Percentage;
            d.commission_value = 150.0;
        });

        let err = block_on(ctl.submit(&client)).unwrap_err();
        assert_eq!(
            err,
            ListError::Editor(EditorError::Invalid(
                "Commission must be between 0 and 100".into()
            ))
        );
        assert!(ctl.editor().is_open());
        assert_eq!(client.calls(), vec!["list:"]);
    }

    #[test]
    fn test_fixed_commission_may_exceed_hundred() {
        let (mut ctl, client) = loaded(vec![]);
        ctl.open_create();
        ctl.on_field_change(|d| {
            d.name = "Agent D".into();
            d.contact = "555".into();
            d.kind = ReferrerKind::Agent;
            d.commission_type = CommissionType::Fixed;
            d.commission_value = 150.0;
        });
        block_on(ctl.submit(&client)).unwrap();
        assert!(!ctl.editor().is_open());
        assert_eq!(ctl.mirror().len(), 1);
    }

    #[test]
    fn test_grouped_by_kind_in_first_seen_order() {
        let (ctl, _client) = loaded(vec![
            referrer("1", "Agent X", ReferrerKind::Agent),
            referrer("2", "Dr. Y", ReferrerKind::Doctor),
            referrer("3", "Agent Z", ReferrerKind::Agent),
        ]);
        let view = ctl.view();
        let groups: Vec<(Option<&str>, Vec<&str>)> = view
            .groups
            .iter()
            .map(|ViewGroup { label, records, .. }| {
                (
                    label.as_deref(),
                    records.iter().map(|r| r.id.as_str()).collect(),
                )
            })
            .collect();
        assert_eq!(
            groups,
            vec![
                (Some("Agent"), vec!["1", "3"]),
                (Some("Doctor"), vec!["2"]),
            ]
        );
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(ENDPOINT.list_path(), "/api/referrers");
        assert_eq!(ENDPOINT.edit_path("a b"), "/api/referrers/edit/a%20b");
        assert_eq!(ENDPOINT.toggle_path("7", false), "/api/referrers/7/deactivate");
    }
}
