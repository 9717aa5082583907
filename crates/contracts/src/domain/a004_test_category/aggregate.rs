use serde::{Deserialize, Serialize};

/// Test category (read-only, used to filter the global catalog)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCategory {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
}

impl TestCategory {
    pub fn collection_name() -> &'static str {
        "test-categories"
    }
}
