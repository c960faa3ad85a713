//! Batch planning for the fixed-arity project query.
//!
//! The remote filter expresses "any of N ids" as N explicit equality
//! comparisons, so every query must carry exactly `batch_size` slots. The
//! final batch is padded with the sentinel id, which matches no project.

use crate::model::ProjectId;

/// Partitions `ids` into batches of exactly `batch_size` slots, sentinel
/// padded. Produces `ceil(len / batch_size)` batches; an empty input plans
/// nothing. `batch_size` must be positive.
pub fn plan(ids: &[ProjectId], batch_size: usize) -> Vec<Vec<ProjectId>> {
    debug_assert!(batch_size > 0, "batch size must be positive");

    let mut batches = Vec::with_capacity(ids.len().div_ceil(batch_size));
    for chunk in ids.chunks(batch_size) {
        let mut batch = chunk.to_vec();
        batch.resize(batch_size, ProjectId::sentinel());
        batches.push(batch);
    }
    tracing::debug!(
        ids = ids.len(),
        batch_size,
        batches = batches.len(),
        "Planned project batches"
    );
    batches
}
