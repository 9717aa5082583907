use serde::{Deserialize, Serialize};

/// Normalized reference to a test category
///
/// The backend sends a category either as a bare id string or as a populated
/// object (`{ "_id": "...", "name": "..." }`). Both shapes are folded into this
/// struct during deserialization, so nothing past the wire boundary has to
/// care which one arrived. Serializes back as the bare id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "CategoryRefWire", into = "String")]
pub struct CategoryRef {
    pub id: String,
    pub name: Option<String>,
}

impl CategoryRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }

    /// Name when the backend populated it, otherwise the id
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.id)
    }

    pub fn is_empty(&self) -> bool {
        self.id.trim().is_empty()
    }
}

impl From<CategoryRef> for String {
    fn from(value: CategoryRef) -> Self {
        value.id
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryRefWire {
    Id(String),
    Object {
        #[serde(alias = "_id")]
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<CategoryRefWire> for CategoryRef {
    fn from(wire: CategoryRefWire) -> Self {
        match wire {
            CategoryRefWire::Id(id) => CategoryRef { id, name: None },
            CategoryRefWire::Object { id, name } => CategoryRef { id, name },
        }
    }
}

/// Deserializes an optional category, treating `null`, `""` and `{ "_id": "" }` as absent
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<CategoryRef>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<CategoryRef>::deserialize(deserializer)?;
    Ok(value.filter(|c| !c.is_empty()))
}
