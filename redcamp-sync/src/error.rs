//! Error types for redcamp-sync.

use thiserror::Error;

use redcamp_core::{ProjectId, TaskId, UpstreamError};

/// A sync run stopped at the named stage.
///
/// Actions issued before the failure are not rolled back.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("listing Redmine projects failed: {0}")]
    ListProjects(#[source] UpstreamError),

    #[error("listing TimeCamp tasks failed: {0}")]
    ListTasks(#[source] UpstreamError),

    #[error("creating task '{name}' for project {project_id} failed: {source}")]
    Create {
        project_id: ProjectId,
        name: String,
        #[source]
        source: UpstreamError,
    },

    #[error("archiving task {task_id} ('{name}') failed: {source}")]
    Archive {
        task_id: TaskId,
        name: String,
        #[source]
        source: UpstreamError,
    },
}
