//! Optional summary and diagram generation through a local Ollama service
//!
//! Every failure is logged and replaced by a sentinel so a note can always
//! be saved without its annexes.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::AnnexError;
use crate::http::{self, ConnectionStatus};
use crate::message::Message;
use crate::settings::Settings;

/// Summary text used when generation fails
pub const SUMMARY_FAILED: &str = "(Summary generation failed)";

const SUMMARY_PROMPT: &str = "Summarize the following conversation concisely. \
List the 3-5 most important points as bullet points.

Conversation:
{conversation}

Summary:";

const DIAGRAM_PROMPT: &str = "Express the flow of the following conversation as a Mermaid.js flowchart.
Keep the diagram simple and readable. Output only Mermaid syntax, without a code block.

Conversation:
{conversation}

Mermaid flowchart:";

/// Producer of optional note annexes. Implementations never fail.
pub trait Annex {
    /// Summary text, or a placeholder on failure
    fn summarize(&self, messages: &[Message]) -> String;

    /// Mermaid flowchart source, or an empty string on failure
    fn diagram(&self, messages: &[Message]) -> String;
}

/// `"{role}: {content}"` lines separated by blank lines
pub fn conversation_text(messages: &[Message]) -> String {
    messages
        .iter()
        .map(Message::transcript_line)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn summary_prompt(messages: &[Message]) -> String {
    SUMMARY_PROMPT.replace("{conversation}", &conversation_text(messages))
}

pub fn diagram_prompt(messages: &[Message]) -> String {
    DIAGRAM_PROMPT.replace("{conversation}", &conversation_text(messages))
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

/// Client for the Ollama HTTP API
pub struct OllamaClient {
    agent: ureq::Agent,
    endpoint: String,
    model: String,
}

impl OllamaClient {
    pub fn new(endpoint: &str, model: &str, timeout: Option<Duration>) -> Self {
        Self {
            agent: http::agent(timeout),
            endpoint: http::trim_endpoint(endpoint),
            model: model.to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            &settings.ollama_endpoint,
            &settings.ollama_model,
            settings.request_timeout(),
        )
    }

    /// One non-streamed completion
    pub fn generate(&self, prompt: &str) -> Result<String, AnnexError> {
        let url = format!("{}/api/generate", self.endpoint);
        let body = serde_json::to_string(&GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        })?;

        debug!(url = %url, model = %self.model, "requesting completion");
        let resp = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .send(body.as_str())?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            return Err(AnnexError::Status { status });
        }

        let text = resp.into_body().read_to_string()?;
        let parsed: GenerateResponse = serde_json::from_str(&text)?;
        Ok(parsed.response)
    }

    /// Liveness probe against `/api/tags`
    pub fn check_connection(&self) -> ConnectionStatus {
        http::probe(&self.agent, &format!("{}/api/tags", self.endpoint), None)
    }

    /// Names of the locally installed models
    pub fn list_models(&self) -> Result<Vec<String>, AnnexError> {
        let resp = self
            .agent
            .get(&format!("{}/api/tags", self.endpoint))
            .call()?;
        if !resp.status().is_success() {
            return Err(AnnexError::Status {
                status: resp.status().as_u16(),
            });
        }

        let text = resp.into_body().read_to_string()?;
        let tags: TagsResponse = serde_json::from_str(&text)?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

impl Annex for OllamaClient {
    fn summarize(&self, messages: &[Message]) -> String {
        match self.generate(&summary_prompt(messages)) {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "summary generation failed");
                SUMMARY_FAILED.to_string()
            }
        }
    }

    fn diagram(&self, messages: &[Message]) -> String {
        match self.generate(&diagram_prompt(messages)) {
            Ok(diagram) => diagram,
            Err(e) => {
                warn!(error = %e, "diagram generation failed");
                String::new()
            }
        }
    }
}
