//! Shared `ureq` plumbing: agent construction, status/transport error
//! mapping and body decoding.

use std::time::Duration;

use serde::de::DeserializeOwned;

use redcamp_core::{Service, UpstreamError};

/// Error bodies are cut to this many characters before they end up in logs.
const MAX_ERROR_BODY: usize = 512;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the blocking agent shared by both clients.
pub fn agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(timeout.min(CONNECT_TIMEOUT))
        .timeout(timeout)
        .user_agent(concat!("redcamp/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Send a request (with an optional JSON body) and return the response body.
///
/// Non-2xx answers become [`UpstreamError::Status`]; anything that prevents a
/// status from being read becomes [`UpstreamError::Transport`].
pub(crate) fn send(
    service: Service,
    request: ureq::Request,
    body: Option<serde_json::Value>,
) -> Result<String, UpstreamError> {
    let method = request.method().to_string();
    let result = match body {
        Some(json) => request.send_json(json),
        None => request.call(),
    };
    let response = result.map_err(|err| map_error(service, err))?;
    tracing::debug!("{service} {method} -> {}", response.status());
    response.into_string().map_err(|e| UpstreamError::Transport {
        service,
        message: format!("reading response body: {e}"),
    })
}

/// Decode a JSON body into `T`.
pub(crate) fn decode<T: DeserializeOwned>(service: Service, body: &str) -> Result<T, UpstreamError> {
    serde_json::from_str(body).map_err(|e| malformed(service, e))
}

pub(crate) fn malformed(service: Service, err: impl std::fmt::Display) -> UpstreamError {
    UpstreamError::Malformed {
        service,
        message: err.to_string(),
    }
}

fn map_error(service: Service, err: ureq::Error) -> UpstreamError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            UpstreamError::Status {
                service,
                status,
                body: truncate(body.trim()),
            }
        }
        ureq::Error::Transport(transport) => UpstreamError::Transport {
            service,
            message: transport.to_string(),
        },
    }
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}
