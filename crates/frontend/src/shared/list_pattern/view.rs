//! Filter/Search/Group engine
//!
//! `derive_view` is a pure function of the mirrored records and the transient
//! filter. Stats are always computed over the unfiltered collection.

use super::record::{Grouping, ListRecord};

/// Label of the bucket holding records without a group key
pub const FALLBACK_GROUP: &str = "Uncategorized";

/// Group labels that always sort after the named groups
const TRAILING_GROUPS: [&str; 2] = ["uncategorized", "other"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
    Online,
    Offline,
}

impl StatusFilter {
    /// Options of screens without a report format
    pub const ACTIVITY: [StatusFilter; 3] =
        [StatusFilter::All, StatusFilter::Active, StatusFilter::Inactive];

    pub const WITH_REPORT_FORMAT: [StatusFilter; 5] = [
        StatusFilter::All,
        StatusFilter::Active,
        StatusFilter::Inactive,
        StatusFilter::Online,
        StatusFilter::Offline,
    ];

    pub fn accepts<T: ListRecord>(&self, record: &T) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => record.is_active(),
            StatusFilter::Inactive => !record.is_active(),
            StatusFilter::Online => record.online_flag() == Some(true),
            StatusFilter::Offline => record.online_flag() == Some(false),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Inactive => "inactive",
            StatusFilter::Online => "online",
            StatusFilter::Offline => "offline",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All statuses",
            StatusFilter::Active => "Active",
            StatusFilter::Inactive => "Inactive",
            StatusFilter::Online => "Online report",
            StatusFilter::Offline => "Offline report",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "active" => StatusFilter::Active,
            "inactive" => StatusFilter::Inactive,
            "online" => StatusFilter::Online,
            "offline" => StatusFilter::Offline,
            _ => StatusFilter::All,
        }
    }
}

/// Transient filter state of a list screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewFilter {
    pub search_text: String,
    pub status: StatusFilter,
    pub category: Option<String>,
}

impl ViewFilter {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Counts over the whole collection, independent of the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub online: usize,
    pub offline: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewGroup<T> {
    /// Grouping identity; `None` only for `Grouping::None`
    pub key: Option<String>,
    /// `None` only for `Grouping::None`
    pub label: Option<String>,
    pub records: Vec<T>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupedView<T> {
    pub groups: Vec<ViewGroup<T>>,
    pub stats: ViewStats,
    /// Records that passed the filter
    pub matched: usize,
}

impl<T> GroupedView<T> {
    pub fn is_empty(&self) -> bool {
        self.matched == 0
    }

    pub fn records(&self) -> impl Iterator<Item = &T> {
        self.groups.iter().flat_map(|g| g.records.iter())
    }
}

pub fn compute_stats<T: ListRecord>(records: &[T]) -> ViewStats {
    let mut stats = ViewStats {
        total: records.len(),
        ..Default::default()
    };
    for record in records {
        if record.is_active() {
            stats.active += 1;
        } else {
            stats.inactive += 1;
        }
        match record.online_flag() {
            Some(true) => stats.online += 1,
            Some(false) => stats.offline += 1,
            None => {}
        }
    }
    stats
}

/// Case-insensitive substring match on any searchable field; whitespace
/// counts, only the empty string matches everything
pub fn matches_search<T: ListRecord>(record: &T, search_text: &str) -> bool {
    let needle = search_text.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn matches_category<T: ListRecord>(record: &T, category: Option<&str>) -> bool {
    match category {
        None => true,
        Some(wanted) => record.category_key() == Some(wanted),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Stable sort by label, case-insensitive, with the fallback buckets last
pub fn sort_groups_by_label<T>(groups: &mut [ViewGroup<T>]) {
    groups.sort_by_cached_key(|g| {
        let label = g.label.clone().unwrap_or_default();
        (is_trailing(&label), label.to_lowercase())
    });
}

fn is_trailing(label: &str) -> bool {
    let lower = label.to_lowercase();
    TRAILING_GROUPS.contains(&lower.as_str())
}

pub fn derive_view<T: ListRecord>(records: &[T], filter: &ViewFilter) -> GroupedView<T> {
    let stats = compute_stats(records);

    let visible: Vec<&T> = records
        .iter()
        .filter(|r| filter.status.accepts(*r))
        .filter(|r| matches_category(*r, filter.category.as_deref()))
        .filter(|r| matches_search(*r, &filter.search_text))
        .collect();
    let matched = visible.len();

    let groups = match T::GROUPING {
        Grouping::None => {
            if visible.is_empty() {
                Vec::new()
            } else {
                vec![ViewGroup {
                    key: None,
                    label: None,
                    records: visible.into_iter().cloned().collect(),
                }]
            }
        }
        Grouping::FirstSeen | Grouping::Alphabetical => {
            let mut groups: Vec<ViewGroup<T>> = Vec::new();
            for record in visible {
                let key = non_blank(record.group_key()).unwrap_or(FALLBACK_GROUP);
                let label = non_blank(record.group_label()).unwrap_or(key);
                match groups.iter_mut().find(|g| g.key.as_deref() == Some(key)) {
                    Some(group) => {
                        // A named record renames a group first seen under its bare key
                        if group.label.as_deref() == Some(key) && label != key {
                            group.label = Some(label.to_string());
                        }
                        group.records.push(record.clone());
                    }
                    None => groups.push(ViewGroup {
                        key: Some(key.to_string()),
                        label: Some(label.to_string()),
                        records: vec![record.clone()],
                    }),
                }
            }
            if T::GROUPING == Grouping::Alphabetical {
                sort_groups_by_label(&mut groups);
            }
            groups
        }
    };

    GroupedView {
        groups,
        stats,
        matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_pattern::testing::{item, Item};
    use proptest::prelude::*;

    fn categorized(id: &str, name: &str, category: Option<&str>) -> Item {
        let mut i = item(id, name);
        i.category = category.map(str::to_string);
        i
    }

    fn labels(view: &GroupedView<Item>) -> Vec<String> {
        view.groups
            .iter()
            .map(|g| g.label.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_search_is_case_insensitive_over_any_field() {
        let mut a = item("1", "Dr. A");
        a.contact = "555-0101".into();
        let records = vec![a, item("2", "Agent B")];

        let filter = |s: &str| ViewFilter {
            search_text: s.into(),
            ..Default::default()
        };
        assert_eq!(derive_view(&records, &filter("DR")).matched, 1);
        assert_eq!(derive_view(&records, &filter("0101")).matched, 1);
        assert_eq!(derive_view(&records, &filter("")).matched, 2);
        assert!(derive_view(&records, &filter("zz")).is_empty());
    }

    #[test]
    fn test_whitespace_search_is_literal() {
        let records = vec![item("1", "AB"), item("2", "Dr. A")];
        let filter = |s: &str| ViewFilter {
            search_text: s.into(),
            ..Default::default()
        };
        assert!(derive_view(&records, &filter("  ")).is_empty());
        let view = derive_view(&records, &filter(" "));
        let shown: Vec<&str> = view.records().map(|r| r.id.as_str()).collect();
        assert_eq!(shown, vec!["2"]);
    }

    #[test]
    fn test_status_filter_exact() {
        let mut inactive = item("2", "B");
        inactive.is_active = false;
        let records = vec![item("1", "A"), inactive];

        let only = |status| ViewFilter {
            status,
            ..Default::default()
        };
        let active: Vec<_> = derive_view(&records, &only(StatusFilter::Active))
            .records()
            .map(|r| r.id.clone())
            .collect();
        assert_eq!(active, vec!["1"]);
        assert_eq!(derive_view(&records, &only(StatusFilter::Inactive)).matched, 1);
        // Items have no online flag
        assert_eq!(derive_view(&records, &only(StatusFilter::Online)).matched, 0);
    }

    #[test]
    fn test_category_filter() {
        let records = vec![
            categorized("1", "CBC", Some("Hematology")),
            categorized("2", "Lipids", Some("Biochemistry")),
        ];
        let filter = ViewFilter {
            category: Some("Hematology".into()),
            ..Default::default()
        };
        let view = derive_view(&records, &filter);
        assert_eq!(view.matched, 1);
        assert_eq!(labels(&view), vec!["Hematology"]);
    }

    #[test]
    fn test_uncategorized_sorts_last() {
        let records = vec![
            categorized("1", "A", Some("Uncategorized")),
            categorized("2", "B", Some("Uncategorized")),
            categorized("3", "C", Some("Hematology")),
        ];
        let view = derive_view(&records, &ViewFilter::default());
        assert_eq!(labels(&view), vec!["Hematology", "Uncategorized"]);
        assert_eq!(view.groups[1].records.len(), 2);
    }

    #[test]
    fn test_missing_key_joins_fallback_bucket_in_insertion_order() {
        let records = vec![
            categorized("1", "First", None),
            categorized("2", "Other test", Some("Other")),
            categorized("3", "Second", Some("Uncategorized")),
            categorized("4", "Urine", Some("Clinical pathology")),
            categorized("5", "Blood", Some("biochemistry")),
        ];
        let view = derive_view(&records, &ViewFilter::default());
        assert_eq!(
            labels(&view),
            vec!["biochemistry", "Clinical pathology", "Other", "Uncategorized"]
        );
        let fallback: Vec<_> = view.groups[3].records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(fallback, vec!["1", "3"]);
    }

    #[test]
    fn test_stats_ignore_filter() {
        let mut inactive = item("2", "B");
        inactive.is_active = false;
        let records = vec![item("1", "A"), inactive];
        let everything = derive_view(&records, &ViewFilter::default()).stats;
        let nothing = derive_view(
            &records,
            &ViewFilter {
                search_text: "zz".into(),
                status: StatusFilter::Active,
                category: Some("none".into()),
            },
        )
        .stats;
        assert_eq!(everything, nothing);
        assert_eq!(everything.total, 2);
        assert_eq!(everything.active, 1);
        assert_eq!(everything.inactive, 1);
    }

    fn arb_item() -> impl Strategy<Value = Item> {
        (
            "[a-z0-9]{1,4}",
            "[A-Za-z .]{0,8}",
            "[0-9a-z-]{0,6}",
            proptest::option::of("[A-Za-z]{1,5}"),
            proptest::option::of(prop_oneof![
                Just("Hematology"),
                Just("Other"),
                Just("Uncategorized"),
                Just("urine"),
            ]),
            any::<bool>(),
        )
            .prop_map(|(id, name, contact, email, category, is_active)| Item {
                id,
                name,
                contact,
                email,
                category: category.map(str::to_string),
                is_active,
                online: None,
            })
    }

    fn arb_filter() -> impl Strategy<Value = ViewFilter> {
        (
            "[A-Za-z0-9 .-]{0,3}",
            prop_oneof![
                Just(StatusFilter::All),
                Just(StatusFilter::Active),
                Just(StatusFilter::Inactive),
            ],
            proptest::option::of(prop_oneof![Just("Hematology"), Just("Other")]),
        )
            .prop_map(|(search_text, status, category)| ViewFilter {
                search_text,
                status,
                category: category.map(str::to_string),
            })
    }

    proptest! {
        #[test]
        fn prop_derive_view_is_deterministic(records in prop::collection::vec(arb_item(), 0..12), filter in arb_filter()) {
            prop_assert_eq!(derive_view(&records, &filter), derive_view(&records, &filter));
        }

        #[test]
        fn prop_search_partitions_records(records in prop::collection::vec(arb_item(), 0..12), search in "[A-Za-z0-9 .-]{0,3}") {
            let filter = ViewFilter { search_text: search.clone(), ..Default::default() };
            let view = derive_view(&records, &filter);
            let shown: Vec<&Item> = view.records().collect();
            for record in &records {
                let hit = search.is_empty()
                    || record
                        .search_fields()
                        .iter()
                        .any(|f| f.to_lowercase().contains(&search.to_lowercase()));
                prop_assert_eq!(shown.iter().any(|s| *s == record), hit);
            }
            prop_assert_eq!(view.matched, shown.len());
        }

        #[test]
        fn prop_stats_invariant_under_filter(records in prop::collection::vec(arb_item(), 0..12), a in arb_filter(), b in arb_filter()) {
            prop_assert_eq!(derive_view(&records, &a).stats, derive_view(&records, &b).stats);
        }
    }
}
