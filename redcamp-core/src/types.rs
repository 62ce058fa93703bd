//! Domain types for both sides of a sync.
//!
//! The Redmine side is read-only ([`SourceProject`]); the TimeCamp side
//! ([`TargetTask`]) is decoded leniently because the TimeCamp API mixes
//! numbers, numeric strings and booleans for the same fields.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Prefix carried by the external id of every task this tool manages.
pub const MANAGED_PREFIX: &str = "redmine_";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Numeric Redmine project id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub u64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for ProjectId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// TimeCamp task id. Kept as text: the API returns it both as a JSON number
/// and as a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<u64> for TaskId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self::from(n)),
            Raw::Text(s) if !s.trim().is_empty() => Ok(Self(s.trim().to_owned())),
            Raw::Text(_) => Err(de::Error::custom("task id must not be empty")),
        }
    }
}

/// The join key between a Redmine project and a TimeCamp task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalTaskId(pub String);

impl ExternalTaskId {
    /// `redmine_<id>`
    pub fn for_project(id: ProjectId) -> Self {
        Self(format!("{MANAGED_PREFIX}{id}"))
    }

    /// True when the id carries the managed prefix.
    pub fn is_managed(&self) -> bool {
        self.0.starts_with(MANAGED_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalTaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ExternalTaskId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ExternalTaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ---------------------------------------------------------------------------
// Source side
// ---------------------------------------------------------------------------

/// Redmine project status. Only `1` counts as active; every other code
/// (closed, archived, scheduled for deletion) is kept verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ProjectStatus {
    Active,
    Inactive(u8),
}

impl ProjectStatus {
    pub const ACTIVE_CODE: u8 = 1;
}

impl From<u8> for ProjectStatus {
    fn from(code: u8) -> Self {
        if code == Self::ACTIVE_CODE {
            ProjectStatus::Active
        } else {
            ProjectStatus::Inactive(code)
        }
    }
}

impl From<ProjectStatus> for u8 {
    fn from(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::Active => ProjectStatus::ACTIVE_CODE,
            ProjectStatus::Inactive(code) => code,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Active => write!(f, "active"),
            ProjectStatus::Inactive(code) => write!(f, "inactive ({code})"),
        }
    }
}

/// A Redmine project as listed by `GET /projects.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceProject {
    pub id: ProjectId,
    pub name: String,
    pub status: ProjectStatus,
}

impl SourceProject {
    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active
    }

    pub fn external_task_id(&self) -> ExternalTaskId {
        ExternalTaskId::for_project(self.id)
    }
}

// ---------------------------------------------------------------------------
// Target side
// ---------------------------------------------------------------------------

/// A TimeCamp task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetTask {
    pub task_id: TaskId,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "de_external_task_id")]
    pub external_task_id: Option<ExternalTaskId>,
    #[serde(default, deserialize_with = "de_flag")]
    pub archived: bool,
}

impl TargetTask {
    /// True when this task belongs to the sync (its external id is managed).
    pub fn is_managed(&self) -> bool {
        self.external_task_id
            .as_ref()
            .is_some_and(ExternalTaskId::is_managed)
    }
}

/// Accepts `true`/`false`, `0`/`1`, `"0"`/`"1"` and `null`.
fn de_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(false),
        Some(Raw::Bool(b)) => Ok(b),
        Some(Raw::Int(n)) => Ok(n != 0),
        Some(Raw::Text(s)) => match s.trim() {
            "" | "0" | "false" => Ok(false),
            "1" | "true" => Ok(true),
            other => Err(de::Error::custom(format!("invalid archived flag '{other}'"))),
        },
    }
}

/// Only non-empty strings count; anything else means the task is unmanaged.
fn de_external_task_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<ExternalTaskId>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(ExternalTaskId(s)),
        _ => None,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
