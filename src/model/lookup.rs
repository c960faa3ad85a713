use serde::{Deserialize, Serialize};

/// A single entry of a lookup table. Entries are fetched lazily, one remote
/// query per referenced internal name, never eagerly with the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    /// Unique within the owning table.
    pub internal_name: String,
    /// Display value, e.g. "North America".
    pub full_value: String,
    pub description: String,
}

impl LookupEntry {
    pub fn new(
        internal_name: impl Into<String>,
        full_value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            internal_name: internal_name.into(),
            full_value: full_value.into(),
            description: description.into(),
        }
    }
}
