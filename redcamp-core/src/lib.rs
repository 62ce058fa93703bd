//! redcamp core library — domain types, configuration, errors.
//!
//! - [`types`] — projects, tasks and the derived `redmine_<id>` key
//! - [`config`] — [`Config`] resolution from file and environment
//! - [`error`] — [`UpstreamError`], [`MalformedResponse`], [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, MalformedResponse, Service, UpstreamError};
pub use types::{
    ExternalTaskId, ProjectId, ProjectStatus, SourceProject, TargetTask, TaskId, MANAGED_PREFIX,
};
