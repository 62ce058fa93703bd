//! Reconciliation entrypoint used by the CLI.
//!
//! One call to each enumerator, then mutations strictly in plan order. The
//! first failing mutation aborts the run; nothing is rolled back.

use crate::error::SyncError;
use crate::plan::{plan, PlannedStep, SyncPlan};
use crate::ports::{ProjectSource, TaskTarget};
use crate::report::{SyncAction, SyncReport};

/// Run one full sync pass.
///
/// With `dry_run` the plan is reported as `WouldCreate` / `WouldArchive`
/// actions and the target is never mutated.
pub fn run<S, T>(source: &S, target: &T, dry_run: bool) -> Result<SyncReport, SyncError>
where
    S: ProjectSource + ?Sized,
    T: TaskTarget + ?Sized,
{
    let projects = source
        .list_active_projects()
        .map_err(SyncError::ListProjects)?;
    tracing::debug!("fetched {} active Redmine projects", projects.len());

    let tasks = target.list_tasks().map_err(SyncError::ListTasks)?;
    tracing::debug!("fetched {} TimeCamp tasks", tasks.len());

    let plan = plan(&projects, &tasks);
    apply(&plan, target, dry_run)
}

/// Execute a precomputed plan against the target.
pub fn apply<T>(plan: &SyncPlan, target: &T, dry_run: bool) -> Result<SyncReport, SyncError>
where
    T: TaskTarget + ?Sized,
{
    let mut actions = Vec::with_capacity(plan.steps.len());

    for step in &plan.steps {
        let action = match step {
            PlannedStep::Keep {
                project_id,
                name,
                task_id,
            } => {
                tracing::info!("project already exists in TimeCamp: {name} (task {task_id})");
                SyncAction::Unchanged {
                    project_id: *project_id,
                    name: name.clone(),
                    task_id: task_id.clone(),
                }
            }
            PlannedStep::Create {
                project_id,
                name,
                external_task_id,
            } => {
                if dry_run {
                    tracing::info!("[dry-run] would create TimeCamp task: {name} ({external_task_id})");
                    SyncAction::WouldCreate {
                        project_id: *project_id,
                        name: name.clone(),
                    }
                } else {
                    tracing::info!("creating TimeCamp task: {name} ({external_task_id})");
                    let created = target.create_task(name, *project_id).map_err(|source| {
                        SyncError::Create {
                            project_id: *project_id,
                            name: name.clone(),
                            source,
                        }
                    })?;
                    SyncAction::Created {
                        project_id: *project_id,
                        name: name.clone(),
                        task_id: created.map(|task| task.task_id),
                    }
                }
            }
            PlannedStep::Archive {
                task_id,
                name,
                external_task_id,
            } => {
                if dry_run {
                    tracing::info!("[dry-run] would archive TimeCamp task: {name} ({external_task_id})");
                    SyncAction::WouldArchive {
                        task_id: task_id.clone(),
                        name: name.clone(),
                    }
                } else {
                    tracing::info!("archiving TimeCamp task: {name} ({external_task_id})");
                    target
                        .archive_task(task_id)
                        .map_err(|source| SyncError::Archive {
                            task_id: task_id.clone(),
                            name: name.clone(),
                            source,
                        })?;
                    SyncAction::Archived {
                        task_id: task_id.clone(),
                        name: name.clone(),
                    }
                }
            }
        };
        actions.push(action);
    }

    Ok(SyncReport { dry_run, actions })
}
