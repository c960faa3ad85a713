use crate::error::{EcfError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Declared data type of an enterprise custom field.
///
/// `Unknown` captures wire codes the report has no rendering rule for, so an
/// unrecognized type is a detectable condition rather than a dropped line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    Text,
    Number,
    Cost,
    Date,
    FinishDate,
    Duration,
    Flag,
    #[serde(untagged)]
    Unknown(i32),
}

impl FieldType {
    /// Maps a PWA wire code to a field type. Codes with no rendering rule
    /// are preserved as `Unknown` instead of being rejected at fetch time.
    pub fn from_code(code: i32) -> Self {
        match code {
            4 => FieldType::Date,
            6 => FieldType::Duration,
            9 => FieldType::Cost,
            15 => FieldType::Number,
            17 => FieldType::Flag,
            21 => FieldType::Text,
            27 => FieldType::FinishDate,
            other => FieldType::Unknown(other),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Text => write!(f, "TEXT"),
            FieldType::Number => write!(f, "NUMBER"),
            FieldType::Cost => write!(f, "COST"),
            FieldType::Date => write!(f, "DATE"),
            FieldType::FinishDate => write!(f, "FINISHDATE"),
            FieldType::Duration => write!(f, "DURATION"),
            FieldType::Flag => write!(f, "FLAG"),
            FieldType::Unknown(code) => write!(f, "UNKNOWN({})", code),
        }
    }
}

impl FromStr for FieldType {
    type Err = EcfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "TEXT" => Ok(FieldType::Text),
            "NUMBER" => Ok(FieldType::Number),
            "COST" => Ok(FieldType::Cost),
            "DATE" => Ok(FieldType::Date),
            "FINISHDATE" => Ok(FieldType::FinishDate),
            "DURATION" => Ok(FieldType::Duration),
            "FLAG" => Ok(FieldType::Flag),
            _ => Err(EcfError::Config(format!("Invalid field type: {}", s))),
        }
    }
}

/// Entity category a custom field is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Project,
    Resource,
    Task,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Project => write!(f, "Project"),
            EntityKind::Resource => write!(f, "Resource"),
            EntityKind::Task => write!(f, "Task"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = EcfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "project" => Ok(EntityKind::Project),
            "resource" => Ok(EntityKind::Resource),
            "task" => Ok(EntityKind::Task),
            _ => Err(EcfError::Config(format!("Invalid entity kind: {}", s))),
        }
    }
}

/// Reference from a custom field to the lookup table constraining its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupTableRef {
    pub id: String,
    pub name: String,
}

/// A single enterprise custom field definition, as fetched from the catalog
/// or alongside a project. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Stable identifier, unique across the site.
    pub internal_name: String,
    /// Friendly name shown to users.
    pub name: String,
    pub field_type: FieldType,
    pub entity: EntityKind,
    /// Present iff the field draws its values from a lookup table. Presence,
    /// not the declared type, decides the resolution strategy.
    pub lookup_table: Option<LookupTableRef>,
}

impl FieldDefinition {
    pub fn is_lookup_backed(&self) -> bool {
        self.lookup_table.is_some()
    }
}
