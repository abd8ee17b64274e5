//! Shared HTTP plumbing for the local services

use serde::{Deserialize, Serialize};
use std::time::Duration;

const USER_AGENT: &str = concat!("session-vault/", env!("CARGO_PKG_VERSION"));

/// Blocking agent that reports non-2xx responses as ordinary responses so
/// their status and body can be inspected.
pub fn agent(timeout: Option<Duration>) -> ureq::Agent {
    ureq::Agent::new_with_config(
        ureq::Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .user_agent(USER_AGENT)
            .build(),
    )
}

/// Outcome of a liveness probe. Probes never fail; they report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConnectionStatus {
    pub fn connected() -> Self {
        Self {
            connected: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            connected: false,
            error: Some(error.into()),
        }
    }
}

/// Probe `url` with a GET; any 2xx counts as connected
pub(crate) fn probe(
    agent: &ureq::Agent,
    url: &str,
    authorization: Option<&str>,
) -> ConnectionStatus {
    let mut request = agent.get(url);
    if let Some(value) = authorization {
        request = request.header("Authorization", value);
    }

    match request.call() {
        Ok(resp) if resp.status().is_success() => ConnectionStatus::connected(),
        Ok(resp) => ConnectionStatus::failed(format!("HTTP {}", resp.status().as_u16())),
        Err(e) => ConnectionStatus::failed(e.to_string()),
    }
}

pub(crate) fn trim_endpoint(endpoint: &str) -> String {
    endpoint.trim_end_matches('/').to_string()
}
