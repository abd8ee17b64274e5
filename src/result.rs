//! Extraction result snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ExtractionError;
use crate::extractors::{truncate_chars, Page, Site, SiteExtractor};
use crate::message::{Message, Role};

/// Number of messages shown in a preview
const PREVIEW_MESSAGES: usize = 3;

/// Characters of each message shown in a preview
const PREVIEW_CHARS: usize = 100;

/// One scrape of one page. Serializes to the shape the host bridge expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub title: String,
    pub url: String,
    pub messages: Vec<Message>,
    #[serde(rename = "markdown")]
    pub markdown_fragment: String,
    pub source: Site,
    pub extracted_at: DateTime<Utc>,
}

impl ExtractionResult {
    /// Bundle extractor output, stamped with the current instant
    pub fn assemble<F>(
        messages: Vec<Message>,
        title: String,
        url: String,
        source: Site,
        render: F,
    ) -> Self
    where
        F: Fn(&[Message]) -> String,
    {
        Self::assemble_at(messages, title, url, source, render, Utc::now())
    }

    /// Bundle extractor output with an explicit timestamp
    pub fn assemble_at<F>(
        messages: Vec<Message>,
        title: String,
        url: String,
        source: Site,
        render: F,
        extracted_at: DateTime<Utc>,
    ) -> Self
    where
        F: Fn(&[Message]) -> String,
    {
        let markdown_fragment = render(&messages);
        Self {
            title,
            url,
            messages,
            markdown_fragment,
            source,
            extracted_at,
        }
    }
}

/// Run one extractor against a page and package the result
pub fn extract_page(
    extractor: &dyn SiteExtractor,
    page: &Page,
) -> Result<ExtractionResult, ExtractionError> {
    let messages = extractor.extract(page)?;
    let title = extractor.title(page)?;
    let labels = extractor.role_labels();
    debug!(
        site = %extractor.site(),
        count = messages.len(),
        title = %title,
        "assembled extraction result"
    );

    Ok(ExtractionResult::assemble_at(
        messages,
        title,
        extractor.url(page),
        extractor.site(),
        |msgs| crate::markdown::render(msgs, labels),
        page.captured_at(),
    ))
}

/// Short human-readable summary of a result: title, link, count and the
/// first few messages
pub fn preview(result: &ExtractionResult) -> String {
    let mut text = format!(
        "📌 {}\n🔗 {}\n📝 {} messages\n\n",
        result.title,
        result.url,
        result.messages.len()
    );

    for msg in result.messages.iter().take(PREVIEW_MESSAGES) {
        let icon = match msg.role {
            Role::User => "👤",
            Role::Assistant => "🤖",
        };
        let ellipsis = if msg.content.chars().count() > PREVIEW_CHARS {
            "..."
        } else {
            ""
        };
        text.push_str(&format!(
            "{} {}{}\n\n",
            icon,
            truncate_chars(&msg.content, PREVIEW_CHARS),
            ellipsis
        ));
    }

    if result.messages.len() > PREVIEW_MESSAGES {
        text.push_str(&format!(
            "... {} more",
            result.messages.len() - PREVIEW_MESSAGES
        ));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::{ChatGptExtractor, ClaudeExtractor};
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_extract_page_bundles_everything() {
        let page = Page::captured(
            r#"<html><head><title>Borrow checker - Claude</title></head><body>
            <div data-testid="human-turn"><p>Hello</p></div>
            <div data-testid="ai-turn"><p>Hi there</p></div>
            </body></html>"#,
            "https://claude.ai/chat/1",
            at(),
        );

        let result = extract_page(&ClaudeExtractor, &page).unwrap();
        assert_eq!(result.title, "Claude-2024-01-15");
        assert_eq!(result.url, "https://claude.ai/chat/1");
        assert_eq!(result.source, Site::Claude);
        assert_eq!(result.extracted_at, at());
        assert_eq!(
            result.markdown_fragment,
            "### **Human**\n\nHello\n\n---\n\n### **Claude**\n\nHi there\n\n---\n\n"
        );
    }

    #[test]
    fn test_empty_page_is_not_an_error() {
        let page = Page::captured("<html><body></body></html>", "https://chatgpt.com/", at());
        let result = extract_page(&ChatGptExtractor, &page).unwrap();
        assert!(result.messages.is_empty());
        assert_eq!(result.markdown_fragment, "");
    }

    #[test]
    fn test_json_shape() {
        let result = ExtractionResult::assemble_at(
            vec![Message::new(Role::User, "Hello").unwrap()],
            "Title".to_string(),
            "https://chatgpt.com/c/1".to_string(),
            Site::ChatGpt,
            |_| "md".to_string(),
            at(),
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["source"], "ChatGPT");
        assert_eq!(json["markdown"], "md");
        assert_eq!(json["extractedAt"], "2024-01-15T10:30:00Z");
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_preview() {
        let long = "a".repeat(120);
        let messages = vec![
            Message::new(Role::User, "Hello").unwrap(),
            Message::new(Role::Assistant, &long).unwrap(),
            Message::new(Role::User, "Bye").unwrap(),
            Message::new(Role::Assistant, "Later").unwrap(),
        ];
        let result = ExtractionResult::assemble_at(
            messages,
            "Greetings".to_string(),
            "https://chatgpt.com/c/1".to_string(),
            Site::ChatGpt,
            |_| String::new(),
            at(),
        );

        let text = preview(&result);
        assert!(
            text.starts_with("📌 Greetings\n🔗 https://chatgpt.com/c/1\n📝 4 messages\n\n")
        );
        assert!(text.contains("👤 Hello\n\n"));
        assert!(text.contains(&format!("🤖 {}...\n\n", "a".repeat(100))));
        assert!(!text.contains("Later"));
        assert!(text.ends_with("... 1 more"));
    }
}
