//! Page category constants.
//!
//! Every routed page declares an HTML `id` of the form `{entity}--{category}`
//! (e.g. `"a001_referrer--list"`) and a `data-page-category` attribute, so a
//! page found in the DOM inspector maps straight to its `domain/` directory.

/// Collection screen: filters, grouped table, editor modal
pub const PAGE_CAT_LIST: &str = "list";

/// Form for a single record rendered as a page
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Free-form page (not found, placeholders)
pub const PAGE_CAT_CUSTOM: &str = "custom";

pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_DETAIL, PAGE_CAT_CUSTOM];

/// `{entity}--{category}` with both parts non-empty
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && !category.is_empty(),
        None => false,
    }
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a003_lab_test--list"));
        assert!(!is_valid_page_id("a003_lab_test"));
        assert!(!is_valid_page_id("--list"));
        assert!(is_known_category(PAGE_CAT_LIST));
        assert!(!is_known_category("dashboard"));
    }
}
