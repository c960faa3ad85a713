//! Type-directed resolution of raw field values.
//!
//! For every field carried by a project record this module decides between
//! the scalar and the lookup strategy, performs the per-entry secondary
//! queries for lookup-backed fields, and formats scalars by declared type.

use crate::client::ProjectService;
use crate::error::{EcfError, Result};
use crate::model::{FieldDefinition, FieldType, LookupTableRef, ProjectRecord, RawValue};
use chrono::NaiveDateTime;

/// A field value after resolution, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedValue {
    /// No value stored for this field on this project. Distinct from a
    /// stored zero or empty string.
    NotSet,
    Scalar(String),
    /// One resolved lookup entry per referenced internal name, input order.
    Entries(Vec<ResolvedEntry>),
    /// Declared type has no rendering rule; carries the wire code.
    Unsupported(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub full_value: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    pub name: String,
    pub field_type: FieldType,
    pub lookup: bool,
    pub value: ResolvedValue,
}

/// Resolves every field carried by `record`, in the order the definitions
/// travelled with the fetch. A failed secondary lookup aborts the rest of
/// the record's resolution.
pub fn project_fields(
    service: &dyn ProjectService,
    record: &ProjectRecord,
) -> Result<Vec<ResolvedField>> {
    record
        .fields
        .iter()
        .map(|def| {
            let value = match &def.lookup_table {
                Some(table) => resolve_lookup(service, record, def, table)?,
                None => resolve_scalar(record, def),
            };
            Ok(ResolvedField {
                name: def.name.clone(),
                field_type: def.field_type,
                lookup: def.is_lookup_backed(),
                value,
            })
        })
        .collect()
}

fn resolve_scalar(record: &ProjectRecord, def: &FieldDefinition) -> ResolvedValue {
    let Some(raw) = record.value_of(&def.internal_name) else {
        return ResolvedValue::NotSet;
    };

    match def.field_type {
        FieldType::Cost => ResolvedValue::Scalar(cost_text(raw)),
        FieldType::Date | FieldType::FinishDate => ResolvedValue::Scalar(date_text(raw)),
        FieldType::Flag => ResolvedValue::Scalar(flag_text(raw)),
        FieldType::Number | FieldType::Duration | FieldType::Text => {
            ResolvedValue::Scalar(plain_text(raw))
        }
        FieldType::Unknown(code) => {
            tracing::warn!(
                field = %def.internal_name,
                code,
                "No rendering rule for field type, reporting as unsupported"
            );
            ResolvedValue::Unsupported(code)
        }
    }
}

fn resolve_lookup(
    service: &dyn ProjectService,
    record: &ProjectRecord,
    def: &FieldDefinition,
    table: &LookupTableRef,
) -> Result<ResolvedValue> {
    let Some(raw) = record.value_of(&def.internal_name) else {
        return Ok(ResolvedValue::NotSet);
    };

    // Lookup values arrive as an array of entry internal names; a bare
    // string is a single-value field.
    let entry_names: Vec<&str> = match raw {
        RawValue::Array(items) => items.iter().filter_map(|v| v.as_str()).collect(),
        RawValue::String(s) => vec![s.as_str()],
        _ => Vec::new(),
    };
    if entry_names.is_empty() {
        return Ok(ResolvedValue::NotSet);
    }

    let mut resolved = Vec::with_capacity(entry_names.len());
    for name in entry_names {
        let matches = service.lookup_entries(&table.id, name)?;
        let count = matches.len();
        let mut matches = matches.into_iter();
        match (matches.next(), count) {
            (Some(entry), 1) => resolved.push(ResolvedEntry {
                full_value: entry.full_value,
                description: entry.description,
            }),
            (None, _) => {
                return Err(EcfError::LookupEntryNotFound {
                    table: table.name.clone(),
                    entry: name.to_string(),
                });
            }
            (Some(_), count) => {
                return Err(EcfError::LookupEntryAmbiguous {
                    table: table.name.clone(),
                    entry: name.to_string(),
                    count,
                });
            }
        }
    }
    Ok(ResolvedValue::Entries(resolved))
}

fn plain_text(raw: &RawValue) -> String {
    match raw {
        RawValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn flag_text(raw: &RawValue) -> String {
    match raw.as_bool() {
        Some(true) => "Yes".to_string(),
        Some(false) => "No".to_string(),
        None => plain_text(raw),
    }
}

fn date_text(raw: &RawValue) -> String {
    let Some(s) = raw.as_str() else {
        return plain_text(raw);
    };
    // PWA serves naive local timestamps; RFC 3339 covered for good measure.
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    s.to_string()
}

fn cost_text(raw: &RawValue) -> String {
    match raw.as_f64() {
        Some(amount) => format_currency(amount),
        None => plain_text(raw),
    }
}

/// US-style currency rendering: `1234.5` becomes `$1,234.50`.
fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let (whole, frac) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();

    format!(
        "{}${}.{:02}",
        if negative { "-" } else { "" },
        grouped,
        frac
    )
}
