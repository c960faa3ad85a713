//! Data models for the custom field report.
//!
//! This module defines the core data structures:
//!
//! - [`FieldDefinition`]: an enterprise custom field definition
//! - [`FieldType`]: declared data types (text, number, cost, date, ...)
//! - [`EntityKind`]: the entity category a field attaches to
//! - [`LookupEntry`]: a single lookup table entry
//! - [`ProjectRecord`]: a published project with its field values

mod field;
mod lookup;
mod project;

pub use field::{EntityKind, FieldDefinition, FieldType, LookupTableRef};
pub use lookup::LookupEntry;
pub use project::{ProjectId, ProjectRecord, RawValue};
