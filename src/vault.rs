//! Note vault client (Obsidian Local REST API)

use std::time::Duration;
use tracing::{debug, info, warn};
use url::form_urlencoded;

use crate::error::PersistenceError;
use crate::http::{self, ConnectionStatus};
use crate::settings::Settings;

/// Destination for assembled notes
pub trait NoteStore {
    /// Write `content` at `path`, replacing whatever the store holds there
    fn put_note(&self, path: &str, content: &str) -> Result<(), PersistenceError>;
}

/// Percent-encode a vault path as one URL component, `/` included
pub fn encode_path(path: &str) -> String {
    form_urlencoded::byte_serialize(path.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

pub struct VaultClient {
    agent: ureq::Agent,
    endpoint: String,
    api_key: String,
}

impl VaultClient {
    pub fn new(endpoint: &str, api_key: &str, timeout: Option<Duration>) -> Self {
        Self {
            agent: http::agent(timeout),
            endpoint: http::trim_endpoint(endpoint),
            api_key: api_key.to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            &settings.vault_endpoint,
            &settings.obsidian_api_key,
            settings.request_timeout(),
        )
    }

    fn authorization(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Liveness probe against the API root
    pub fn check_connection(&self) -> ConnectionStatus {
        let authorization = self.authorization();
        http::probe(
            &self.agent,
            &format!("{}/", self.endpoint),
            Some(authorization.trim_end()),
        )
    }
}

impl NoteStore for VaultClient {
    fn put_note(&self, path: &str, content: &str) -> Result<(), PersistenceError> {
        let url = format!("{}/vault/{}", self.endpoint, encode_path(path));
        debug!(url = %url, bytes = content.len(), "writing note");

        let resp = self
            .agent
            .put(&url)
            .header("Content-Type", "text/markdown")
            .header("Authorization", self.authorization())
            .send(content)?;

        let status = resp.status();
        if !status.is_success() {
            let body = match resp.into_body().read_to_string() {
                Ok(body) => body,
                Err(e) => {
                    warn!(status = status.as_u16(), error = %e, "failed to read vault error body");
                    format!("(unreadable response body: {e})")
                }
            };
            return Err(PersistenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        info!(path = %path, status = status.as_u16(), "note saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path_matches_uri_component() {
        assert_eq!(
            encode_path("SessionVault-logs/2024-01-15_Claude_My chat.md"),
            "SessionVault-logs%2F2024-01-15_Claude_My%20chat.md"
        );
        assert_eq!(encode_path("a+b"), "a%2Bb");
        assert_eq!(encode_path("日本"), "%E6%97%A5%E6%9C%AC");
    }

    #[test]
    fn test_status_error_message() {
        let err = PersistenceError::Status {
            status: 401,
            body: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "REST API error: 401 - Unauthorized");
        assert_eq!(err.status(), Some(401));
    }
}
