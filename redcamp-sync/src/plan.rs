//! Sync planning: diff Redmine projects against TimeCamp tasks.
//!
//! ## Rules
//!
//! 1. Index tasks by external id; a later task with the same id replaces an
//!    earlier one.
//! 2. Expected ids are `redmine_<id>` for every active project.
//! 3. An active project whose id is not indexed gets a `Create`, otherwise a
//!    `Keep`. Source order is preserved.
//! 4. A task is archived when its id is managed, it is not archived yet and
//!    its id is not expected. Target order is preserved.
//!
//! Tasks without a managed id are never touched, and archived tasks are never
//! revived.

use std::collections::{HashMap, HashSet};

use redcamp_core::{ExternalTaskId, ProjectId, SourceProject, TargetTask, TaskId};

/// One decision of a [`SyncPlan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedStep {
    /// The project has no task yet.
    Create {
        project_id: ProjectId,
        name: String,
        external_task_id: ExternalTaskId,
    },
    /// The project already has a task.
    Keep {
        project_id: ProjectId,
        name: String,
        task_id: TaskId,
    },
    /// The task's project is gone or no longer active.
    Archive {
        task_id: TaskId,
        name: String,
        external_task_id: ExternalTaskId,
    },
}

/// Ordered decisions: project steps first, then archive steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub steps: Vec<PlannedStep>,
}

impl SyncPlan {
    pub fn creates(&self) -> impl Iterator<Item = &PlannedStep> {
        self.steps
            .iter()
            .filter(|s| matches!(s, PlannedStep::Create { .. }))
    }

    pub fn archives(&self) -> impl Iterator<Item = &PlannedStep> {
        self.steps
            .iter()
            .filter(|s| matches!(s, PlannedStep::Archive { .. }))
    }

    /// True when applying the plan would not call the mutator at all.
    pub fn is_noop(&self) -> bool {
        self.steps
            .iter()
            .all(|s| matches!(s, PlannedStep::Keep { .. }))
    }
}

/// Compute the plan. Pure; no I/O.
///
/// Inactive projects in `projects` are ignored, so callers may pass an
/// unfiltered listing.
pub fn plan(projects: &[SourceProject], tasks: &[TargetTask]) -> SyncPlan {
    let index: HashMap<&ExternalTaskId, &TargetTask> = tasks
        .iter()
        .filter_map(|t| t.external_task_id.as_ref().map(|key| (key, t)))
        .collect();

    let active: Vec<&SourceProject> = projects.iter().filter(|p| p.is_active()).collect();
    let expected: HashSet<ExternalTaskId> =
        active.iter().map(|p| p.external_task_id()).collect();

    let mut steps = Vec::with_capacity(active.len());

    for project in &active {
        let key = project.external_task_id();
        match index.get(&key) {
            Some(task) => steps.push(PlannedStep::Keep {
                project_id: project.id,
                name: project.name.clone(),
                task_id: task.task_id.clone(),
            }),
            None => steps.push(PlannedStep::Create {
                project_id: project.id,
                name: project.name.clone(),
                external_task_id: key,
            }),
        }
    }

    for task in tasks {
        let Some(key) = task.external_task_id.as_ref() else {
            continue;
        };
        if !key.is_managed() || task.archived || expected.contains(key) {
            continue;
        }
        steps.push(PlannedStep::Archive {
            task_id: task.task_id.clone(),
            name: task.name.clone(),
            external_task_id: key.clone(),
        });
    }

    SyncPlan { steps }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
