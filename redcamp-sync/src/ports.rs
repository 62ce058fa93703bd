//! The two remote systems as seen by the reconciler.
//!
//! `redcamp-clients` implements these over HTTP; tests use in-memory fakes.

use redcamp_core::{ProjectId, SourceProject, TargetTask, TaskId, UpstreamError};

/// Read side of the issue tracker.
pub trait ProjectSource {
    /// Every project whose status is active, in service order.
    fn list_active_projects(&self) -> Result<Vec<SourceProject>, UpstreamError>;
}

/// Read and write side of the time tracker.
pub trait TaskTarget {
    /// Every task visible to the token, archived ones included.
    ///
    /// Implementations degrade an unrecognised listing to an empty list
    /// instead of failing.
    fn list_tasks(&self) -> Result<Vec<TargetTask>, UpstreamError>;

    /// Create a task tagged `redmine_<project_id>` under the configured parent.
    ///
    /// `None` when the service accepted the task but did not answer with it.
    fn create_task(
        &self,
        name: &str,
        project_id: ProjectId,
    ) -> Result<Option<TargetTask>, UpstreamError>;

    /// Mark a task archived.
    fn archive_task(&self, task_id: &TaskId) -> Result<TargetTask, UpstreamError>;
}
