use super::FieldDefinition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// GUID-string identifier of a published project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// The nil GUID. Used to pad the final batch to full arity; the remote
    /// filter matches it against nothing.
    pub const SENTINEL_STR: &'static str = "00000000-0000-0000-0000-000000000000";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn sentinel() -> Self {
        Self(Self::SENTINEL_STR.to_string())
    }

    pub fn is_sentinel(&self) -> bool {
        self.0 == Self::SENTINEL_STR
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw field value as it arrives off the wire, before type-directed
/// resolution. `serde_json::Value::Null` and an absent map key both mean
/// "not set"; lookup-backed fields carry an array of entry internal names.
pub type RawValue = serde_json::Value;

/// One published project with the custom field definitions and raw values
/// that travelled with its fetch. Lives for a single report run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub name: String,
    /// Definitions fetched alongside this project, in server order.
    pub fields: Vec<FieldDefinition>,
    /// Field internal name to raw value. BTreeMap keeps report output
    /// deterministic across runs.
    pub values: BTreeMap<String, RawValue>,
}

impl ProjectRecord {
    /// Raw value for a field, with an absent key and an explicit null both
    /// treated as unset.
    pub fn value_of(&self, internal_name: &str) -> Option<&RawValue> {
        self.values
            .get(internal_name)
            .filter(|v| !v.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sentinel_never_matches_real_id() {
        let real = ProjectId::new("8e9b8c5a-1111-2222-3333-444455556666");
        assert!(!real.is_sentinel());
        assert!(ProjectId::sentinel().is_sentinel());
        assert_ne!(real, ProjectId::sentinel());
    }

    #[test]
    fn test_value_of_distinguishes_null_from_zero() {
        let record = ProjectRecord {
            id: ProjectId::new("p1"),
            name: "P1".to_string(),
            fields: Vec::new(),
            values: BTreeMap::from([
                ("unset".to_string(), json!(null)),
                ("zero".to_string(), json!(0)),
            ]),
        };
        assert!(record.value_of("unset").is_none());
        assert!(record.value_of("missing").is_none());
        assert_eq!(record.value_of("zero"), Some(&json!(0)));
    }
}
