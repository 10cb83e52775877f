//! The seam to whatever performs a task's rewrite.

use thiserror::Error;
use tracing::debug;

use super::RefactoringTask;
use crate::snapshot::Snapshot;

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("Task {task_id} cannot be applied: {reason}")]
    Rejected { task_id: String, reason: String },
}

/// Applies a task to a snapshot, producing the next snapshot.
///
/// The analyzer is re-run from scratch on whatever comes back.
pub trait TaskApplier {
    fn apply(&self, snapshot: &Snapshot, task: &RefactoringTask) -> Result<Snapshot, ApplyError>;
}

/// Returns the snapshot unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityApplier;

impl TaskApplier for IdentityApplier {
    fn apply(&self, snapshot: &Snapshot, task: &RefactoringTask) -> Result<Snapshot, ApplyError> {
        debug!(task = %task.id, "No rewrite registered; snapshot unchanged");
        Ok(snapshot.clone())
    }
}
