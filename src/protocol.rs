//! Message-passing boundary between the host and the page context
//!
//! Requests and responses are plain JSON objects. Failures are reported
//! in-band as `{"success": false, "error": "..."}`.

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::extractors::Page;
use crate::http::ConnectionStatus;
use crate::registry::SiteRegistry;
use crate::result::ExtractionResult;

/// Request sent to the page context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ContentRequest {
    ExtractConversation,
}

/// Liveness requests answered by the background context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum BackgroundRequest {
    CheckConnection,
    CheckOllama {
        #[serde(default)]
        endpoint: Option<String>,
    },
}

/// Reply from the page context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ExtractionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContentResponse {
    pub fn ok(data: ExtractionResult) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Answer a page-context request
pub fn handle_request(
    registry: &SiteRegistry,
    page: &Page,
    request: &ContentRequest,
) -> ContentResponse {
    match request {
        ContentRequest::ExtractConversation => match registry.extract(page) {
            Ok(result) => ContentResponse::ok(result),
            Err(e) => {
                error!(url = %page.url(), error = %e, "extraction failed");
                ContentResponse::failed(e.to_string())
            }
        },
    }
}

/// JSON-in, JSON-out variant of [`handle_request`]. Malformed requests are
/// answered with a failure response rather than an error.
pub fn handle_request_json(registry: &SiteRegistry, page: &Page, request_json: &str) -> String {
    let response = match serde_json::from_str::<ContentRequest>(request_json) {
        Ok(request) => handle_request(registry, page, &request),
        Err(e) => ContentResponse::failed(format!("Failed to parse request JSON: {e}")),
    };

    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(r#"{{"success":false,"error":"Failed to serialize response: {e}"}}"#)
    })
}

/// Answer a liveness request using the supplied probes
pub fn handle_background<V, O>(request: &BackgroundRequest, vault: V, ollama: O) -> ConnectionStatus
where
    V: FnOnce() -> ConnectionStatus,
    O: FnOnce(Option<&str>) -> ConnectionStatus,
{
    match request {
        BackgroundRequest::CheckConnection => vault(),
        BackgroundRequest::CheckOllama { endpoint } => ollama(endpoint.as_deref()),
    }
}
