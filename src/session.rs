//! Extract-then-save workflow
//!
//! A session holds at most one extraction result. A new extraction replaces
//! it; a successful save clears it; a failed save leaves it for a retry.

use chrono::Utc;
use tracing::info;

use crate::annex::Annex;
use crate::error::SessionError;
use crate::extractors::Page;
use crate::note::{build_note, build_path, AssembledNote};
use crate::registry::SiteRegistry;
use crate::result::{preview, ExtractionResult};
use crate::settings::Settings;
use crate::vault::NoteStore;

#[derive(Default)]
pub struct Session {
    registry: SiteRegistry,
    current: Option<ExtractionResult>,
}

impl Session {
    pub fn new(registry: SiteRegistry) -> Self {
        Self {
            registry,
            current: None,
        }
    }

    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    pub fn current(&self) -> Option<&ExtractionResult> {
        self.current.as_ref()
    }

    /// Extract the conversation on `page`, replacing any previous result.
    /// On failure the previous result is kept.
    pub fn extract(&mut self, page: &Page) -> Result<&ExtractionResult, SessionError> {
        let result = self.registry.extract(page)?;
        info!(
            source = %result.source,
            count = result.messages.len(),
            "extracted conversation"
        );
        Ok(self.current.insert(result))
    }

    /// Preview of the current result, if previews are enabled
    pub fn preview(&self, settings: &Settings) -> Option<String> {
        if !settings.show_preview {
            return None;
        }
        self.current.as_ref().map(preview)
    }

    /// Enrich the current result with annexes, assemble the note and write it.
    pub fn save(
        &mut self,
        settings: &Settings,
        annex: &dyn Annex,
        store: &dyn NoteStore,
    ) -> Result<AssembledNote, SessionError> {
        let result = self.current.as_ref().ok_or(SessionError::NothingToSave)?;

        let summary = if settings.include_summary {
            annex.summarize(&result.messages)
        } else {
            String::new()
        };
        let diagram = if settings.include_mermaid {
            annex.diagram(&result.messages)
        } else {
            String::new()
        };

        let content = build_note(result, &summary, &diagram);
        let path = build_path(
            &settings.folder_path,
            Utc::now().date_naive(),
            result.source.tag(),
            &result.title,
        );

        store.put_note(&path, &content)?;
        self.current = None;
        Ok(AssembledNote { path, content })
    }
}
