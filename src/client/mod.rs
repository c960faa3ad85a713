//! Remote service boundary.
//!
//! [`ProjectService`] is the seam between the report pipeline and the PWA
//! site. The pipeline only ever performs four reads; everything about
//! transport, sessions and query syntax lives behind it.

mod rest;

pub use rest::RestService;

use crate::error::Result;
use crate::model::{FieldDefinition, LookupEntry, ProjectId, ProjectRecord};

/// Read-only query interface over the project management service.
///
/// All calls block until they return or fail; failures surface as
/// [`EcfError::RemoteQuery`](crate::error::EcfError::RemoteQuery) and are
/// never retried.
pub trait ProjectService {
    /// Fetches every custom field definition on the site, ordered by owning
    /// entity category name with ties in fetch order. Single-shot.
    fn load_catalog(&self) -> Result<Vec<FieldDefinition>>;

    /// Fetches the ids of all published projects, nothing else.
    fn list_project_ids(&self) -> Result<Vec<ProjectId>>;

    /// Fetches the projects whose id equals one of the batch's non-sentinel
    /// slots, with their custom field definitions and raw values. The batch
    /// must have the planner's fixed arity; sentinel slots match nothing.
    fn fetch_projects(&self, batch: &[ProjectId]) -> Result<Vec<ProjectRecord>>;

    /// Fetches the entries of lookup table `table_id` whose internal name is
    /// exactly `internal_name`. Cardinality is the caller's concern.
    fn lookup_entries(&self, table_id: &str, internal_name: &str) -> Result<Vec<LookupEntry>>;
}
