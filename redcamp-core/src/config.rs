//! Runtime configuration.
//!
//! # Sources
//!
//! ```text
//! ~/.redcamp/config.yaml   (optional; or the path given with --config)
//! environment variables    (override the file, key by key)
//! ```
//!
//! # API pattern
//!
//! - `load_at(home, file, env)` — explicit home and env lookup; used in tests
//! - `load(file)` — derives home from `dirs::home_dir()` and reads the real
//!   process environment, delegates to `load_at`
//!
//! Tests must NEVER call `load`; always use `load_at`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::TaskId;

pub const REDMINE_URL: &str = "REDMINE_URL";
pub const REDMINE_API_KEY: &str = "REDMINE_API_KEY";
pub const TIMECAMP_URL: &str = "TIMECAMP_URL";
pub const TIMECAMP_API_TOKEN: &str = "TIMECAMP_API_TOKEN";
pub const TIMECAMP_TASK_ID: &str = "TIMECAMP_TASK_ID";
pub const TIMEOUT_SECS: &str = "REDCAMP_TIMEOUT_SECS";

pub const DEFAULT_TIMECAMP_URL: &str = "https://app.timecamp.com/third_party/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Where to read projects from.
#[derive(Debug)]
pub struct RedmineConfig {
    /// Base URL without the trailing `/projects.json`.
    pub url: String,
    pub api_key: SecretString,
}

/// Where to write tasks to.
#[derive(Debug)]
pub struct TimeCampConfig {
    /// API root, e.g. `https://app.timecamp.com/third_party/api`.
    pub url: String,
    pub api_token: SecretString,
    /// Every created task is placed under this task.
    pub parent_task_id: TaskId,
}

/// Everything a sync run needs, resolved once at startup.
#[derive(Debug)]
pub struct Config {
    pub redmine: RedmineConfig,
    pub timecamp: TimeCampConfig,
    /// Per-request timeout applied by the HTTP agent.
    pub timeout: Duration,
}

// ---------------------------------------------------------------------------
// File layer
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    redmine: RedmineSection,
    #[serde(default)]
    timecamp: TimeCampSection,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RedmineSection {
    url: Option<String>,
    api_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TimeCampSection {
    url: Option<String>,
    api_token: Option<String>,
    parent_task_id: Option<TaskId>,
}

/// `<home>/.redcamp/config.yaml` — pure, no I/O.
pub fn default_path_at(home: &Path) -> PathBuf {
    home.join(".redcamp").join("config.yaml")
}

fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if contents.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Resolve the configuration.
///
/// `file` is an explicit config path and must exist; without it the default
/// `<home>/.redcamp/config.yaml` is read when present. `env` looks up an
/// environment variable; empty values count as unset.
pub fn load_at<F>(home: Option<&Path>, file: Option<&Path>, env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let file = match file {
        Some(path) if !path.exists() => {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            })
        }
        Some(path) => read_file(path)?,
        None => match home.map(default_path_at) {
            Some(path) if path.exists() => read_file(&path)?,
            _ => ConfigFile::default(),
        },
    };
    resolve(file, env)
}

/// `load_at` convenience wrapper over the process environment.
pub fn load(file: Option<&Path>) -> Result<Config, ConfigError> {
    let home = dirs::home_dir();
    load_at(home.as_deref(), file, |var| std::env::var(var).ok())
}

fn resolve<F>(file: ConfigFile, env: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |var: &'static str, fallback: Option<String>| -> Option<String> {
        env(var)
            .filter(|v| !v.trim().is_empty())
            .or(fallback.filter(|v| !v.trim().is_empty()))
            .map(|v| v.trim().to_owned())
    };
    let required = |var: &'static str, fallback: Option<String>| {
        lookup(var, fallback).ok_or(ConfigError::Missing { var })
    };

    let redmine_url = required(REDMINE_URL, file.redmine.url)?;
    let redmine_key = required(REDMINE_API_KEY, file.redmine.api_key)?;
    let timecamp_token = required(TIMECAMP_API_TOKEN, file.timecamp.api_token)?;
    let parent_task_id = required(TIMECAMP_TASK_ID, file.timecamp.parent_task_id.map(|id| id.0))?;
    let timecamp_url = lookup(TIMECAMP_URL, file.timecamp.url)
        .unwrap_or_else(|| DEFAULT_TIMECAMP_URL.to_owned());

    let timeout = match env(TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
        Some(raw) => parse_timeout(&raw)?,
        None => file
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT),
    };
    if timeout.is_zero() {
        return Err(ConfigError::Invalid {
            var: TIMEOUT_SECS,
            message: "timeout must be at least one second".into(),
        });
    }

    Ok(Config {
        redmine: RedmineConfig {
            url: trim_base(redmine_url),
            api_key: SecretString::from(redmine_key),
        },
        timecamp: TimeCampConfig {
            url: trim_base(timecamp_url),
            api_token: SecretString::from(timecamp_token),
            parent_task_id: TaskId::from(parent_task_id),
        },
        timeout,
    })
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::Invalid {
            var: TIMEOUT_SECS,
            message: format!("'{raw}': {e}"),
        })
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
