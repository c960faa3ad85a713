use super::ProjectService;
use crate::config::EcfConfig;
use crate::error::{EcfError, Result};
use crate::model::{
    EntityKind, FieldDefinition, FieldType, LookupEntry, LookupTableRef, ProjectId, ProjectRecord,
};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// Blocking REST client over the PWA OData endpoint.
///
/// One instance per run: the HTTP client and resolved site URL are the run's
/// session, built once before the first query and dropped on exit.
pub struct RestService {
    client: Client,
    base: Url,
    access_token: Option<String>,
}

impl RestService {
    pub fn new(config: &EcfConfig) -> Result<Self> {
        let mut base = Url::parse(&config.site_url)
            .map_err(|e| EcfError::Config(format!("Invalid site URL: {}", e)))?;
        // Url::join drops the last segment unless the base ends with a slash
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        tracing::debug!(site = %base, timeout_secs = config.timeout_secs, "Session established");

        Ok(Self {
            client,
            base,
            access_token: config.access_token.clone(),
        })
    }

    fn get_collection<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let url = self
            .base
            .join(path)
            .map_err(|e| EcfError::Config(format!("Invalid query path {}: {}", path, e)))?;

        tracing::debug!(path, "Executing remote query");

        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, "application/json;odata=nometadata")
            .query(query);
        if let Some(ref token) = self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(EcfError::RemoteQuery(format!(
                "{} returned HTTP {}",
                path, status
            )));
        }

        let collection: ODataCollection<T> = response.json()?;
        Ok(collection.value)
    }
}

impl ProjectService for RestService {
    fn load_catalog(&self) -> Result<Vec<FieldDefinition>> {
        let fields: Vec<WireCustomField> = self.get_collection(
            "_api/ProjectServer/CustomFields",
            &[
                ("$select", "InternalName,Name,FieldType,EntityTypeName"),
                ("$expand", "LookupTable"),
            ],
        )?;

        let mut catalog = fields
            .into_iter()
            .map(WireCustomField::into_definition)
            .collect::<Result<Vec<_>>>()?;
        // Order by owning entity category; stable sort keeps fetch order
        // within a category.
        catalog.sort_by_key(|f| f.entity);

        tracing::info!(count = catalog.len(), "Loaded custom field catalog");
        Ok(catalog)
    }

    fn list_project_ids(&self) -> Result<Vec<ProjectId>> {
        let projects: Vec<WireProjectId> =
            self.get_collection("_api/ProjectServer/Projects", &[("$select", "Id")])?;

        tracing::info!(count = projects.len(), "Listed published projects");
        Ok(projects
            .into_iter()
            .map(|p| ProjectId::new(p.id))
            .collect())
    }

    fn fetch_projects(&self, batch: &[ProjectId]) -> Result<Vec<ProjectRecord>> {
        let filter = batch_filter(batch);
        let projects: Vec<WireProject> = self.get_collection(
            "_api/ProjectServer/Projects",
            &[
                ("$filter", filter.as_str()),
                ("$select", "Id,Name,FieldValues"),
                ("$expand", "CustomFields,CustomFields/LookupTable"),
            ],
        )?;

        tracing::debug!(matched = projects.len(), "Fetched project batch");
        projects
            .into_iter()
            .map(WireProject::into_record)
            .collect()
    }

    fn lookup_entries(&self, table_id: &str, internal_name: &str) -> Result<Vec<LookupEntry>> {
        let path = format!("_api/ProjectServer/LookupTables('{}')/Entries", table_id);
        let filter = format!("InternalName eq '{}'", internal_name.replace('\'', "''"));
        let entries: Vec<WireLookupEntry> = self.get_collection(
            &path,
            &[
                ("$filter", filter.as_str()),
                ("$select", "InternalName,FullValue,Description"),
            ],
        )?;

        Ok(entries.into_iter().map(WireLookupEntry::into_entry).collect())
    }
}

/// Disjunctive equality filter over every slot of a fixed-arity batch. The
/// endpoint has no variable-length "in" predicate; sentinel slots are sent
/// as-is and match nothing.
fn batch_filter(batch: &[ProjectId]) -> String {
    batch
        .iter()
        .map(|id| format!("Id eq guid'{}'", id))
        .collect::<Vec<_>>()
        .join(" or ")
}

#[derive(Debug, Deserialize)]
struct ODataCollection<T> {
    value: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireCustomField {
    internal_name: String,
    name: String,
    field_type: i32,
    entity_type_name: String,
    #[serde(default)]
    lookup_table: Option<WireLookupTable>,
}

impl WireCustomField {
    fn into_definition(self) -> Result<FieldDefinition> {
        let entity: EntityKind = self.entity_type_name.parse().map_err(|_| {
            EcfError::RemoteQuery(format!(
                "Unexpected entity type {:?} on field {}",
                self.entity_type_name, self.internal_name
            ))
        })?;
        Ok(FieldDefinition {
            internal_name: self.internal_name,
            name: self.name,
            field_type: FieldType::from_code(self.field_type),
            entity,
            lookup_table: self.lookup_table.map(|lt| LookupTableRef {
                id: lt.id,
                name: lt.name,
            }),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireLookupTable {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireProjectId {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireProject {
    id: String,
    name: String,
    #[serde(default)]
    custom_fields: Vec<WireCustomField>,
    #[serde(default)]
    field_values: BTreeMap<String, serde_json::Value>,
}

impl WireProject {
    fn into_record(self) -> Result<ProjectRecord> {
        let fields = self
            .custom_fields
            .into_iter()
            .map(WireCustomField::into_definition)
            .collect::<Result<Vec<_>>>()?;
        Ok(ProjectRecord {
            id: ProjectId::new(self.id),
            name: self.name,
            fields,
            values: self.field_values,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireLookupEntry {
    internal_name: String,
    full_value: String,
    #[serde(default)]
    description: String,
}

impl WireLookupEntry {
    fn into_entry(self) -> LookupEntry {
        LookupEntry {
            internal_name: self.internal_name,
            full_value: self.full_value,
            description: self.description,
        }
    }
}
