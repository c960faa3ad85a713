use std::cell::RefCell;
use std::collections::BTreeMap;

use ecf_report::client::ProjectService;
use ecf_report::error::{EcfError, Result};
use ecf_report::model::{
    EntityKind, FieldDefinition, FieldType, LookupEntry, LookupTableRef, ProjectId, ProjectRecord,
};
use ecf_report::pipeline;
use serde_json::json;

/// In-memory service over fixed data. Also counts fetch_projects calls so
/// batching behavior is observable.
struct FakeService {
    catalog: Vec<FieldDefinition>,
    projects: Vec<ProjectRecord>,
    // table id -> entries
    tables: BTreeMap<String, Vec<LookupEntry>>,
    fetch_calls: RefCell<usize>,
}

impl ProjectService for FakeService {
    fn load_catalog(&self) -> Result<Vec<FieldDefinition>> {
        Ok(self.catalog.clone())
    }

    fn list_project_ids(&self) -> Result<Vec<ProjectId>> {
        Ok(self.projects.iter().map(|p| p.id.clone()).collect())
    }

    fn fetch_projects(&self, batch: &[ProjectId]) -> Result<Vec<ProjectRecord>> {
        *self.fetch_calls.borrow_mut() += 1;
        Ok(self
            .projects
            .iter()
            .filter(|p| batch.contains(&p.id))
            .cloned()
            .collect())
    }

    fn lookup_entries(&self, table_id: &str, internal_name: &str) -> Result<Vec<LookupEntry>> {
        Ok(self
            .tables
            .get(table_id)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.internal_name == internal_name)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

fn priority_field() -> FieldDefinition {
    FieldDefinition {
        internal_name: "Custom_Priority".to_string(),
        name: "Priority".to_string(),
        field_type: FieldType::Text,
        entity: EntityKind::Project,
        lookup_table: None,
    }
}

fn region_field() -> FieldDefinition {
    FieldDefinition {
        internal_name: "Custom_Region".to_string(),
        name: "Region".to_string(),
        field_type: FieldType::Text,
        entity: EntityKind::Project,
        lookup_table: Some(LookupTableRef {
            id: "lt-regions".to_string(),
            name: "Regions".to_string(),
        }),
    }
}

fn regions_table() -> (String, Vec<LookupEntry>) {
    (
        "lt-regions".to_string(),
        vec![
            LookupEntry::new("NA", "North America", "Americas region"),
            LookupEntry::new("EU", "Europe", "European region"),
        ],
    )
}

fn project(id: &str, name: &str, values: Vec<(&str, serde_json::Value)>) -> ProjectRecord {
    ProjectRecord {
        id: ProjectId::new(id),
        name: name.to_string(),
        fields: vec![priority_field(), region_field()],
        values: values
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    }
}

fn sample_service() -> FakeService {
    FakeService {
        catalog: vec![priority_field(), region_field()],
        projects: vec![project(
            "aaaaaaaa-0000-0000-0000-000000000001",
            "P1",
            vec![
                ("Custom_Priority", json!("High")),
                ("Custom_Region", json!(["EU"])),
            ],
        )],
        tables: BTreeMap::from([regions_table()]),
        fetch_calls: RefCell::new(0),
    }
}

fn run_to_string(service: &FakeService, batch_size: usize) -> String {
    let mut out = Vec::new();
    pipeline::run(service, batch_size, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_end_to_end_scalar_and_lookup_fields() {
    let service = sample_service();
    let output = run_to_string(&service, 20);

    // Catalog section
    assert!(output.contains("definitions for Projects, Resources, and Tasks: 2"));
    assert!(output.contains("Custom_Priority"));

    // Project section: scalar value and resolved lookup entry
    assert!(output.contains("Name:\tP1"));
    assert!(output.contains("High"));
    assert!(output.contains("Yes"));
    assert!(output.contains("Europe"));
    assert!(output.contains("European region"));
    // The raw entry internal name never leaks into the report
    assert!(!output.contains("\"EU\""));
}

#[test]
fn test_unset_field_reported_as_not_set() {
    let mut service = sample_service();
    service.projects = vec![project(
        "aaaaaaaa-0000-0000-0000-000000000002",
        "P2",
        vec![("Custom_Region", json!(["NA"]))],
    )];

    let output = run_to_string(&service, 20);
    assert!(output.contains("is not set"));
    assert!(output.contains("North America"));
}

#[test]
fn test_batching_one_query_per_planned_batch() {
    let mut service = sample_service();
    service.projects = (0..5)
        .map(|i| {
            project(
                &format!("{:08x}-0000-0000-0000-00000000000a", i),
                &format!("P{}", i),
                vec![("Custom_Priority", json!("Low"))],
            )
        })
        .collect();

    let output = run_to_string(&service, 2);
    assert_eq!(*service.fetch_calls.borrow(), 3); // ceil(5 / 2)
    for i in 0..5 {
        assert!(output.contains(&format!("Name:\tP{}", i)));
    }
}

#[test]
fn test_missing_lookup_entry_aborts_the_run() {
    let mut service = sample_service();
    service.projects = vec![project(
        "aaaaaaaa-0000-0000-0000-000000000003",
        "P3",
        vec![("Custom_Region", json!(["APAC"]))],
    )];

    let mut out = Vec::new();
    let err = pipeline::run(&service, 20, &mut out).unwrap_err();
    assert!(matches!(
        err,
        EcfError::LookupEntryNotFound { ref table, ref entry }
            if table == "Regions" && entry == "APAC"
    ));

    // The catalog section was already written and is not rolled back
    let written = String::from_utf8(out).unwrap();
    assert!(written.contains("definitions for Projects, Resources, and Tasks"));
}

#[test]
fn test_two_runs_produce_identical_output() {
    let service = sample_service();
    let first = run_to_string(&service, 20);
    let second = run_to_string(&service, 20);
    assert_eq!(first, second);
}

#[test]
fn test_empty_site_still_renders_catalog() {
    let service = FakeService {
        catalog: vec![priority_field()],
        projects: Vec::new(),
        tables: BTreeMap::new(),
        fetch_calls: RefCell::new(0),
    };

    let output = run_to_string(&service, 20);
    assert!(output.contains("definitions for Projects, Resources, and Tasks: 1"));
    assert_eq!(*service.fetch_calls.borrow(), 0);
}
