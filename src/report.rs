//! Plain-text rendering of the catalog and per-project sections.
//!
//! Pure formatting: no remote calls, deterministic output for identical
//! input. The layout mirrors the classic PWA sample report, columns aligned
//! with fixed widths.

use crate::model::{FieldDefinition, ProjectRecord};
use crate::resolve::{ResolvedField, ResolvedValue};

const NOT_SET: &str = "is not set";
const UNSUPPORTED: &str = "(unsupported type)";

/// Renders the catalog section: a count followed by one numbered row per
/// definition, in the loader's order.
pub fn render_catalog(definitions: &[FieldDefinition]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Enterprise Custom Field (ECF) definitions for Projects, Resources, and Tasks: {}\n\n",
        definitions.len()
    ));
    out.push_str(&format!(
        "     {:<22} {:<42} {:<10} {}\n",
        "ECF Name", "InternalName", "Type", "Association"
    ));
    out.push_str(&format!(
        "     {:<22} {:<42} {:<10} {}\n",
        "-".repeat(20),
        "-".repeat(40),
        "-".repeat(8),
        "-".repeat(11)
    ));

    for (i, def) in definitions.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {:<22} {:<42} {:<10} {}\n",
            i + 1,
            def.name,
            def.internal_name,
            def.field_type.to_string(),
            def.entity
        ));
    }
    out.push_str(&format!("     {}\n", "-".repeat(88)));

    out
}

/// Renders one project section: identity header, then one row per resolved
/// field (lookup fields with several entries continue onto aligned rows).
pub fn render_project(record: &ProjectRecord, fields: &[ResolvedField]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Name:\t{}\n", record.name));
    out.push_str(&format!("Id:\t{}\n", record.id));
    out.push_str(&format!("ECF count: {}\n\n", fields.len()));

    out.push_str(&format!(
        "    {:<10} {:<22} {:<5} {:<24} {}\n",
        "Type", "Name", "L.UP", "Value", "Description"
    ));
    out.push_str(&format!(
        "    {:<10} {:<22} {:<5} {:<24} {}\n",
        "-".repeat(8),
        "-".repeat(20),
        "-".repeat(4),
        "-".repeat(22),
        "-".repeat(11)
    ));

    for field in fields {
        render_field(&mut out, field);
    }
    out.push_str(&format!("    {}\n\n", "-".repeat(72)));

    out
}

fn render_field(out: &mut String, field: &ResolvedField) {
    let lookup_mark = if field.lookup { "Yes" } else { "" };

    match &field.value {
        ResolvedValue::NotSet => {
            out.push_str(&field_row(field, lookup_mark, NOT_SET, ""));
        }
        ResolvedValue::Scalar(text) => {
            out.push_str(&field_row(field, lookup_mark, text, ""));
        }
        ResolvedValue::Unsupported(_) => {
            out.push_str(&field_row(field, lookup_mark, UNSUPPORTED, ""));
        }
        ResolvedValue::Entries(entries) => {
            for (i, entry) in entries.iter().enumerate() {
                if i == 0 {
                    out.push_str(&field_row(
                        field,
                        lookup_mark,
                        &entry.full_value,
                        &entry.description,
                    ));
                } else {
                    // Continuation rows leave the type and name columns blank.
                    let row = format!(
                        "    {:<10} {:<22} {:<5} {:<24} {}",
                        "", "", lookup_mark, entry.full_value, entry.description
                    );
                    out.push_str(&format!("{}\n", row.trim_end()));
                }
            }
        }
    }
}

fn field_row(field: &ResolvedField, lookup_mark: &str, value: &str, description: &str) -> String {
    let row = format!(
        "    {:<10} {:<22} {:<5} {:<24} {}",
        field.field_type.to_string(),
        field.name,
        lookup_mark,
        value,
        description
    );
    format!("{}\n", row.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityKind, FieldType, LookupTableRef, ProjectId};
    use crate::resolve::ResolvedEntry;
    use std::collections::BTreeMap;

    fn definition(name: &str, entity: EntityKind) -> FieldDefinition {
        FieldDefinition {
            internal_name: format!("Custom_{}", name),
            name: name.to_string(),
            field_type: FieldType::Text,
            entity,
            lookup_table: None,
        }
    }

    fn sample_record() -> ProjectRecord {
        ProjectRecord {
            id: ProjectId::new("aaaaaaaa-0000-0000-0000-000000000001"),
            name: "Alpha".to_string(),
            fields: Vec::new(),
            values: BTreeMap::new(),
        }
    }

    #[test]
    fn test_catalog_lists_count_and_numbered_rows() {
        let defs = vec![
            definition("Status", EntityKind::Project),
            definition("Discipline", EntityKind::Resource),
        ];
        let text = render_catalog(&defs);

        assert!(text.contains("definitions for Projects, Resources, and Tasks: 2"));
        assert!(text.contains("  1. Status"));
        assert!(text.contains("  2. Discipline"));
        assert!(text.contains("Project"));
        assert!(text.contains("Resource"));
    }

    #[test]
    fn test_catalog_lists_lookup_backed_fields_too() {
        let mut def = definition("Region", EntityKind::Project);
        def.lookup_table = Some(LookupTableRef {
            id: "lt-1".to_string(),
            name: "Regions".to_string(),
        });
        let text = render_catalog(&[def]);
        assert!(text.contains("Region"));
        assert!(text.contains("Custom_Region"));
    }

    #[test]
    fn test_project_header_and_scalar_row() {
        let fields = vec![ResolvedField {
            name: "Priority".to_string(),
            field_type: FieldType::Text,
            lookup: false,
            value: ResolvedValue::Scalar("High".to_string()),
        }];
        let text = render_project(&sample_record(), &fields);

        assert!(text.contains("Name:\tAlpha"));
        assert!(text.contains("Id:\taaaaaaaa-0000-0000-0000-000000000001"));
        assert!(text.contains("ECF count: 1"));
        assert!(text.contains("TEXT"));
        assert!(text.contains("Priority"));
        assert!(text.contains("High"));
    }

    #[test]
    fn test_unset_field_renders_is_not_set() {
        let fields = vec![ResolvedField {
            name: "Budget".to_string(),
            field_type: FieldType::Cost,
            lookup: false,
            value: ResolvedValue::NotSet,
        }];
        let text = render_project(&sample_record(), &fields);
        assert!(text.contains("is not set"));
        assert!(!text.contains('$'));
    }

    #[test]
    fn test_lookup_entries_render_one_row_each_in_order() {
        let fields = vec![ResolvedField {
            name: "Color".to_string(),
            field_type: FieldType::Text,
            lookup: true,
            value: ResolvedValue::Entries(vec![
                ResolvedEntry {
                    full_value: "Red".to_string(),
                    description: "Primary color".to_string(),
                },
                ResolvedEntry {
                    full_value: "Blue".to_string(),
                    description: "Secondary color".to_string(),
                },
            ]),
        }];
        let text = render_project(&sample_record(), &fields);

        let red = text.find("Red").unwrap();
        let blue = text.find("Blue").unwrap();
        assert!(red < blue);
        assert!(text.contains("Yes"));
        assert!(text.contains("Primary color"));
        assert!(text.contains("Secondary color"));
        // Field name appears once; the second entry is a continuation row.
        assert_eq!(text.matches("Color").count(), 1);
    }

    #[test]
    fn test_unsupported_type_still_produces_a_row() {
        let fields = vec![ResolvedField {
            name: "Mystery".to_string(),
            field_type: FieldType::Unknown(99),
            lookup: false,
            value: ResolvedValue::Unsupported(99),
        }];
        let text = render_project(&sample_record(), &fields);
        assert!(text.contains("(unsupported type)"));
        assert!(text.contains("UNKNOWN(99)"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let defs = vec![definition("Status", EntityKind::Project)];
        assert_eq!(render_catalog(&defs), render_catalog(&defs));
    }
}
