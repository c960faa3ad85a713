//! The report run: catalog, then batch-by-batch project processing.
//!
//! Strictly sequential. Any remote failure aborts the remaining work; output
//! already written stays written.

use crate::batch;
use crate::client::ProjectService;
use crate::error::Result;
use crate::{report, resolve};
use std::io::Write;

/// Runs the full report against `service`, writing sections to `out` as
/// they are produced.
pub fn run(service: &dyn ProjectService, batch_size: usize, out: &mut dyn Write) -> Result<()> {
    let catalog = service.load_catalog()?;
    out.write_all(report::render_catalog(&catalog).as_bytes())?;

    let ids = service.list_project_ids()?;
    tracing::info!(projects = ids.len(), batch_size, "Starting project report");

    for planned in batch::plan(&ids, batch_size) {
        for record in service.fetch_projects(&planned)? {
            let fields = resolve::project_fields(service, &record)?;
            out.write_all(report::render_project(&record, &fields).as_bytes())?;
        }
    }
    Ok(())
}

/// Renders only the catalog section.
pub fn run_catalog(service: &dyn ProjectService, out: &mut dyn Write) -> Result<()> {
    let catalog = service.load_catalog()?;
    out.write_all(report::render_catalog(&catalog).as_bytes())?;
    Ok(())
}
