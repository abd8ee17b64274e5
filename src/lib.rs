//! SessionVault: AI chat transcripts to Markdown notes
//!
//! Turns a rendered chat page into a normalized message sequence and files
//! it as a note in a local vault:
//! - Per-site extractors (ChatGPT, Claude, Gemini, Google AI Studio) with
//!   cascading selector fallbacks
//! - Markdown transcript rendering
//! - Optional summary and Mermaid diagram annexes from a local Ollama model
//! - Note assembly and vault persistence over the Obsidian Local REST API

pub mod annex;
pub mod error;
pub mod extractors;
pub mod http;
pub mod markdown;
pub mod message;
pub mod note;
pub mod protocol;
pub mod registry;
pub mod result;
pub mod session;
pub mod settings;
pub mod vault;

pub use annex::{Annex, OllamaClient};
pub use error::*;
pub use extractors::{Page, Site, SiteExtractor};
pub use http::ConnectionStatus;
pub use message::{Message, Role};
pub use note::{build_note, build_path, AssembledNote};
pub use registry::SiteRegistry;
pub use result::ExtractionResult;
pub use session::Session;
pub use settings::Settings;
pub use vault::{NoteStore, VaultClient};
