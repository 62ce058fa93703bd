//! The synchronization pass behind `redcamp`.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use colored::Colorize;

use redcamp_clients::{http, RedmineClient, TimeCampClient};
use redcamp_core::config;
use redcamp_sync::{pipeline, SyncAction, SyncReport};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

pub fn run(config_path: Option<&Path>, dry_run: bool) -> Result<()> {
    println!(
        "Starting synchronization at {}",
        Local::now().format(TIMESTAMP_FORMAT)
    );

    let config = config::load(config_path).context("failed to load configuration")?;
    let agent = http::agent(config.timeout);
    let redmine = RedmineClient::new(config.redmine, agent.clone());
    let timecamp = TimeCampClient::new(config.timecamp, agent);

    let report = pipeline::run(&redmine, &timecamp, dry_run).context("synchronization failed")?;
    print_report(&report);

    println!(
        "Synchronization finished at {}",
        Local::now().format(TIMESTAMP_FORMAT)
    );
    Ok(())
}

fn print_report(report: &SyncReport) {
    let prefix = if report.dry_run { "[dry-run] " } else { "" };

    if report.is_noop() {
        println!(
            "{prefix}{} Synchronization complete. Nothing to do ({} unchanged)",
            "✓".green(),
            report.unchanged()
        );
        return;
    }

    println!(
        "{prefix}{} Synchronization complete. ({} created, {} archived, {} unchanged)",
        "✓".green(),
        report.created(),
        report.archived(),
        report.unchanged()
    );

    for action in &report.actions {
        match action {
            SyncAction::Created {
                project_id,
                name,
                task_id: Some(task_id),
            } => println!("  {}  {name} (project {project_id} → task {task_id})", "+".green()),
            SyncAction::Created {
                project_id,
                name,
                task_id: None,
            } => println!("  {}  {name} (project {project_id})", "+".green()),
            SyncAction::WouldCreate { project_id, name } => {
                println!("  {}  {name} (project {project_id})", "~".yellow())
            }
            SyncAction::Archived { task_id, name } => {
                println!("  {}  {name} (task {task_id})", "-".red())
            }
            SyncAction::WouldArchive { task_id, name } => {
                println!("  {}  {name} (task {task_id}, archive)", "~".yellow())
            }
            SyncAction::Unchanged { .. } => {}
        }
    }
}
