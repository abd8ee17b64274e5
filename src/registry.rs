//! URL-based site detection

use url::Url;

use crate::error::ExtractionError;
use crate::extractors::{
    AiStudioExtractor, ChatGptExtractor, ClaudeExtractor, GeminiExtractor, Page, Site,
    SiteExtractor,
};
use crate::result::{extract_page, ExtractionResult};

/// Decides whether a page address belongs to a site
pub type UrlPredicate = fn(&Url) -> bool;

struct Entry {
    matches: UrlPredicate,
    extractor: Box<dyn SiteExtractor>,
}

/// Ordered mapping from URL predicates to extractors. First match wins.
pub struct SiteRegistry {
    entries: Vec<Entry>,
}

impl SiteRegistry {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn register(&mut self, matches: UrlPredicate, extractor: Box<dyn SiteExtractor>) {
        self.entries.push(Entry { matches, extractor });
    }

    /// Extractor for a page address, or `None` for unsupported or
    /// unparsable addresses
    pub fn detect(&self, url: &str) -> Option<&dyn SiteExtractor> {
        let parsed = Url::parse(url).ok()?;
        self.entries
            .iter()
            .find(|entry| (entry.matches)(&parsed))
            .map(|entry| entry.extractor.as_ref())
    }

    /// Site of a page address
    pub fn detect_site(&self, url: &str) -> Option<Site> {
        self.detect(url).map(|extractor| extractor.site())
    }

    /// Extract a page with the extractor its address selects
    pub fn extract(&self, page: &Page) -> Result<ExtractionResult, ExtractionError> {
        let extractor = self
            .detect(page.url())
            .ok_or_else(|| ExtractionError::UnsupportedSite(page.url().to_string()))?;
        extract_page(extractor, page)
    }
}

impl Default for SiteRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(is_chatgpt, Box::new(ChatGptExtractor));
        registry.register(is_claude, Box::new(ClaudeExtractor));
        registry.register(is_gemini, Box::new(GeminiExtractor));
        registry.register(is_ai_studio, Box::new(AiStudioExtractor));
        registry
    }
}

/// Host equals `domain` or is a subdomain of it
fn host_matches(url: &Url, domain: &str) -> bool {
    match url.host_str() {
        Some(host) => {
            let host = host.to_ascii_lowercase();
            host == domain || host.ends_with(&format!(".{domain}"))
        }
        None => false,
    }
}

fn is_chatgpt(url: &Url) -> bool {
    host_matches(url, "chatgpt.com") || host_matches(url, "chat.openai.com")
}

fn is_claude(url: &Url) -> bool {
    host_matches(url, "claude.ai")
}

fn is_gemini(url: &Url) -> bool {
    host_matches(url, "gemini.google.com")
}

fn is_ai_studio(url: &Url) -> bool {
    host_matches(url, "aistudio.google.com")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_supported_sites() {
        let registry = SiteRegistry::default();

        assert_eq!(registry.detect_site("https://chatgpt.com/c/1"), Some(Site::ChatGpt));
        assert_eq!(registry.detect_site("https://chat.openai.com/c/1"), Some(Site::ChatGpt));
        assert_eq!(registry.detect_site("https://claude.ai/chat/x"), Some(Site::Claude));
        assert_eq!(registry.detect_site("https://gemini.google.com/app"), Some(Site::Gemini));
        assert_eq!(
            registry.detect_site("https://aistudio.google.com/prompts/new_chat"),
            Some(Site::GoogleAiStudio)
        );
    }

    #[test]
    fn test_unsupported_addresses() {
        let registry = SiteRegistry::default();

        assert!(registry.detect("https://example.com/claude.ai").is_none());
        assert!(registry.detect("https://notclaude.ai/").is_none());
        assert!(registry.detect("https://google.com/").is_none());
        assert!(registry.detect("not a url").is_none());
        assert!(SiteRegistry::empty().detect("https://claude.ai/").is_none());
    }
}
