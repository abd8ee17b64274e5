//! Error types
//!
//! One enum per failure family. Extraction and persistence failures are
//! terminal for their operation; annex failures are absorbed by the caller.

use thiserror::Error;

/// Unexpected failure while reading page structure.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A selector could not be compiled
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    /// The page URL is not handled by any registered site
    #[error("unsupported site: {0}")]
    UnsupportedSite(String),
}

/// Failure of a summary or diagram request. Never leaves the annex module
/// except through logs.
#[derive(Error, Debug)]
pub enum AnnexError {
    #[error("inference request failed: {0}")]
    Transport(#[from] ureq::Error),

    #[error("inference service returned HTTP {status}")]
    Status { status: u16 },

    #[error("invalid inference payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to write a note to the vault.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("REST API error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("vault request failed: {0}")]
    Transport(#[from] ureq::Error),
}

impl PersistenceError {
    /// HTTP status code, when the vault answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }
}

/// Failure to read or write the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Failure of a user-triggered session action.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("no extracted conversation to save")]
    NothingToSave,

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
