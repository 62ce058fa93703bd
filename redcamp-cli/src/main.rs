//! redcamp — keep TimeCamp tasks in step with Redmine projects.
//!
//! # Usage
//!
//! ```text
//! redcamp                    # one synchronization pass
//! redcamp --dry-run          # show what would change
//! redcamp --config <path>    # read settings from a YAML file
//! ```
//!
//! Settings come from `~/.redcamp/config.yaml` and the environment
//! (`REDMINE_URL`, `REDMINE_API_KEY`, `TIMECAMP_API_TOKEN`,
//! `TIMECAMP_TASK_ID`, optional `TIMECAMP_URL`, `REDCAMP_TIMEOUT_SECS`).

mod sync;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// Create missing TimeCamp tasks for active Redmine projects and archive the
/// ones whose project is gone.
#[derive(Parser, Debug)]
#[command(
    name = "redcamp",
    version,
    about = "Sync active Redmine projects into TimeCamp tasks",
    long_about = None,
)]
struct Cli {
    /// Show what would be created or archived without changing TimeCamp.
    #[arg(long)]
    dry_run: bool,

    /// Read settings from this YAML file instead of ~/.redcamp/config.yaml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    sync::run(cli.config.as_deref(), cli.dry_run)
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
