//! What a sync run did.

use redcamp_core::{ProjectId, TaskId};

/// Outcome for a single project or task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// A TimeCamp task was created for the project. `task_id` is unknown
    /// when the create answer did not carry the new task.
    Created {
        project_id: ProjectId,
        name: String,
        task_id: Option<TaskId>,
    },
    /// Dry run: the task *would* have been created.
    WouldCreate { project_id: ProjectId, name: String },
    /// A stale managed task was archived.
    Archived { task_id: TaskId, name: String },
    /// Dry run: the task *would* have been archived.
    WouldArchive { task_id: TaskId, name: String },
    /// The project already has a task; nothing to do.
    Unchanged {
        project_id: ProjectId,
        name: String,
        task_id: TaskId,
    },
}

/// Summary of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub dry_run: bool,
    pub actions: Vec<SyncAction>,
}

impl SyncReport {
    /// Created or would-be-created tasks.
    pub fn created(&self) -> usize {
        self.count(|a| {
            matches!(
                a,
                SyncAction::Created { .. } | SyncAction::WouldCreate { .. }
            )
        })
    }

    /// Archived or would-be-archived tasks.
    pub fn archived(&self) -> usize {
        self.count(|a| {
            matches!(
                a,
                SyncAction::Archived { .. } | SyncAction::WouldArchive { .. }
            )
        })
    }

    pub fn unchanged(&self) -> usize {
        self.count(|a| matches!(a, SyncAction::Unchanged { .. }))
    }

    /// True when no mutation was (or would have been) issued.
    pub fn is_noop(&self) -> bool {
        self.created() == 0 && self.archived() == 0
    }

    fn count(&self, pred: impl Fn(&SyncAction) -> bool) -> usize {
        self.actions.iter().filter(|a| pred(a)).count()
    }
}
