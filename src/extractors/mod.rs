//! Per-site conversation extractors
//!
//! Each site module provides an ordered list of extraction strategies and a
//! title policy. The first strategy that yields messages wins.

mod ai_studio_extractor;
mod chatgpt_extractor;
mod claude_extractor;
mod css_extractor;
mod gemini_extractor;

pub use ai_studio_extractor::*;
pub use chatgpt_extractor::*;
pub use claude_extractor::*;
pub use css_extractor::*;
pub use gemini_extractor::*;

use chrono::{DateTime, Utc};
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::ExtractionError;
use crate::markdown::RoleLabels;
use crate::message::Message;

/// Maximum length of an extracted title, in characters
pub const TITLE_MAX_CHARS: usize = 100;

/// A loaded page: parsed document, its address and the capture instant
pub struct Page {
    document: Html,
    url: String,
    captured_at: DateTime<Utc>,
}

impl Page {
    /// Parse a page captured now
    pub fn parse(html: &str, url: &str) -> Self {
        Self::captured(html, url, Utc::now())
    }

    /// Parse a page captured at a known instant
    pub fn captured(html: &str, url: &str, captured_at: DateTime<Utc>) -> Self {
        Self {
            document: Html::parse_document(html),
            url: url.to_string(),
            captured_at,
        }
    }

    pub fn document(&self) -> &Html {
        &self.document
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

/// Supported chat sites. Serialized as the source tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Site {
    #[serde(rename = "ChatGPT")]
    ChatGpt,
    #[serde(rename = "Claude")]
    Claude,
    #[serde(rename = "Gemini")]
    Gemini,
    #[serde(rename = "GoogleAIStudio")]
    GoogleAiStudio,
}

impl Site {
    /// Source tag stored in notes and file names
    pub fn tag(&self) -> &'static str {
        match self {
            Site::ChatGpt => "ChatGPT",
            Site::Claude => "Claude",
            Site::Gemini => "Gemini",
            Site::GoogleAiStudio => "GoogleAIStudio",
        }
    }

    /// Human-readable product name
    pub fn display_name(&self) -> &'static str {
        match self {
            Site::GoogleAiStudio => "Google AI Studio",
            other => other.tag(),
        }
    }

    /// Prefix of the date-based fallback title
    pub fn fallback_prefix(&self) -> &'static str {
        match self {
            Site::GoogleAiStudio => "AIStudio",
            other => other.tag(),
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Result of one strategy tier: `None` when its containers were absent
pub type TierResult = Result<Option<Vec<Message>>, ExtractionError>;

/// One named extraction tier
#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub run: fn(&Html) -> TierResult,
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy").field("name", &self.name).finish()
    }
}

/// Evaluate tiers in order; first non-empty result wins, otherwise empty
pub fn run_cascade(
    document: &Html,
    strategies: &[Strategy],
) -> Result<Vec<Message>, ExtractionError> {
    for strategy in strategies {
        match (strategy.run)(document)? {
            Some(messages) if !messages.is_empty() => {
                debug!(
                    strategy = strategy.name,
                    count = messages.len(),
                    "extracted messages"
                );
                return Ok(messages);
            }
            Some(_) => debug!(strategy = strategy.name, "containers matched but were blank"),
            None => debug!(strategy = strategy.name, "no containers matched"),
        }
    }
    Ok(Vec::new())
}

/// How a site rejects a title candidate that is really its product name
#[derive(Debug, Clone, Copy)]
pub enum TitleReject {
    Equals(&'static str),
    Contains(&'static str),
}

impl TitleReject {
    fn rejects(&self, candidate: &str) -> bool {
        match self {
            TitleReject::Equals(name) => candidate == *name,
            TitleReject::Contains(name) => candidate.contains(name),
        }
    }
}

/// Scraping strategy for one chat site
pub trait SiteExtractor: Send + Sync {
    fn site(&self) -> Site;

    fn role_labels(&self) -> RoleLabels;

    /// Extraction tiers, most specific first
    fn strategies(&self) -> &'static [Strategy];

    /// Title selectors, most specific first
    fn title_candidates(&self) -> &'static [&'static str];

    fn title_reject(&self) -> TitleReject;

    fn extract(&self, page: &Page) -> Result<Vec<Message>, ExtractionError> {
        run_cascade(page.document(), self.strategies())
    }

    fn title(&self, page: &Page) -> Result<String, ExtractionError> {
        let reject = self.title_reject();
        for selector in self.title_candidates() {
            let Some(element) = select_first(page.document(), selector)? else {
                continue;
            };
            let text = inner_text(element);
            if text.is_empty() || reject.rejects(&text) {
                continue;
            }
            return Ok(truncate_chars(&text, TITLE_MAX_CHARS));
        }

        Ok(format!(
            "{}-{}",
            self.site().fallback_prefix(),
            page.captured_at().format("%Y-%m-%d")
        ))
    }

    fn url(&self, page: &Page) -> String {
        page.url().to_string()
    }
}

/// First `max` characters of `text`
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
