//! "Add from catalog": which global tests can still be added to the menu.

use contracts::domain::a003_lab_test::aggregate::LabTest;
use contracts::domain::a004_test_category::aggregate::TestCategory;
use contracts::domain::a005_global_test::aggregate::GlobalTest;
use std::collections::HashSet;

/// Identity used to decide whether a catalog entry is already on the menu:
/// the code when present, otherwise the name (both case-insensitive)
fn identity(code: Option<&str>, name: &str) -> String {
    match code.map(str::trim).filter(|c| !c.is_empty()) {
        Some(code) => format!("code:{}", code.to_lowercase()),
        None => format!("name:{}", name.trim().to_lowercase()),
    }
}

/// Catalog entries matching the picker filters and not yet on the menu,
/// in catalog order
pub fn available_tests<'a>(
    catalog: &'a [GlobalTest],
    menu: &[LabTest],
    category: Option<&str>,
    search: &str,
) -> Vec<&'a GlobalTest> {
    let taken: HashSet<String> = menu
        .iter()
        .map(|t| identity(t.code.as_deref(), &t.name))
        .collect();
    let needle = search.trim().to_lowercase();

    catalog
        .iter()
        .filter(|g| !taken.contains(&identity(g.code.as_deref(), &g.name)))
        .filter(|g| match category {
            Some(id) => g.category_id() == Some(id),
            None => true,
        })
        .filter(|g| {
            needle.is_empty()
                || g.name.to_lowercase().contains(&needle)
                || g.code
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase().contains(&needle))
        })
        .collect()
}

/// (id, name) options for category selects: the loaded categories first,
/// then any category only known from the menu itself
pub fn category_options(categories: &[TestCategory], menu: &[LabTest]) -> Vec<(String, String)> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut options = Vec::new();
    for c in categories {
        if seen.insert(c.id.as_str()) {
            options.push((c.id.clone(), c.name.clone()));
        }
    }
    for category in menu.iter().filter_map(|t| t.category.as_ref()) {
        if seen.insert(category.id.as_str()) {
            options.push((category.id.clone(), category.label().to_string()));
        }
    }
    options
}
