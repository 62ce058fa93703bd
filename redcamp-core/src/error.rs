//! Error types for redcamp-core.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The remote system a request was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Redmine,
    TimeCamp,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Redmine => write!(f, "Redmine"),
            Service::TimeCamp => write!(f, "TimeCamp"),
        }
    }
}

/// A failed call to either remote system.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, TLS, timeout or I/O failure before a status was received.
    #[error("{service} request failed: {message}")]
    Transport { service: Service, message: String },

    /// The server answered with a non-2xx status.
    #[error("{service} answered HTTP {status}: {body}")]
    Status {
        service: Service,
        status: u16,
        body: String,
    },

    /// The body could not be decoded into the expected shape.
    #[error("{service} returned malformed data: {message}")]
    Malformed { service: Service, message: String },
}

impl UpstreamError {
    pub fn service(&self) -> Service {
        match self {
            UpstreamError::Transport { service, .. }
            | UpstreamError::Status { service, .. }
            | UpstreamError::Malformed { service, .. } => *service,
        }
    }
}

/// The TimeCamp task listing had a shape that cannot be turned into tasks.
///
/// Never propagated: the target enumerator logs it and yields no tasks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected task listing: {detail}")]
pub struct MalformedResponse {
    pub detail: String,
}

/// Errors raised while assembling [`crate::config::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required setting is absent from both the environment and the file.
    #[error("missing required setting {var}; set it in the environment or the config file")]
    Missing { var: &'static str },

    /// A setting is present but not a valid value.
    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },

    /// An explicitly requested config file does not exist.
    #[error("config file not found at {path}")]
    FileNotFound { path: PathBuf },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error, with path and serde_yaml's line context.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
