//! Gemini (gemini.google.com)

use scraper::Html;

use super::css_extractor::{class_contains_any, content_text, has_within, inner_text, select_all};
use super::{Site, SiteExtractor, Strategy, TierResult, TitleReject};
use crate::markdown::RoleLabels;
use crate::message::{Message, Role};

static STRATEGIES: [Strategy; 3] = [
    Strategy {
        name: "turn-containers",
        run: by_turn_containers,
    },
    Strategy {
        name: "query-response-elements",
        run: by_custom_elements,
    },
    Strategy {
        name: "message-ids",
        run: by_message_ids,
    },
];

static TITLE_CANDIDATES: [&str; 3] = [".conversation-title", r#"[class*="chat-title"]"#, "h1"];

#[derive(Debug, Default, Clone, Copy)]
pub struct GeminiExtractor;

impl SiteExtractor for GeminiExtractor {
    fn site(&self) -> Site {
        Site::Gemini
    }

    fn role_labels(&self) -> RoleLabels {
        RoleLabels::new("User", "Gemini")
    }

    fn strategies(&self) -> &'static [Strategy] {
        &STRATEGIES
    }

    fn title_candidates(&self) -> &'static [&'static str] {
        &TITLE_CANDIDATES
    }

    fn title_reject(&self) -> TitleReject {
        TitleReject::Contains("Gemini")
    }
}

fn by_turn_containers(document: &Html) -> TierResult {
    let containers = select_all(
        document,
        r#"[class*="conversation-turn"], [class*="message-content"], .chat-message"#,
    )?;
    if containers.is_empty() {
        return Ok(None);
    }

    let mut messages = Vec::with_capacity(containers.len());
    for container in containers {
        let is_user = class_contains_any(container, &["user", "query"])
            || has_within(container, r#"[class*="user"]"#)?;
        let role = if is_user { Role::User } else { Role::Assistant };
        let content = content_text(container, ".markdown-content, .text-content, p")?;
        messages.extend(Message::new(role, &content));
    }
    Ok(Some(messages))
}

/// `<user-query>` / `<model-response>` components
fn by_custom_elements(document: &Html) -> TierResult {
    let elements = select_all(document, "user-query, model-response")?;
    if elements.is_empty() {
        return Ok(None);
    }

    let mut messages = Vec::with_capacity(elements.len());
    for element in elements {
        let role = if element.value().name() == "user-query" {
            Role::User
        } else {
            Role::Assistant
        };
        let content = content_text(element, ".query-text, .markdown, message-content")?;
        messages.extend(Message::new(role, &content));
    }
    Ok(Some(messages))
}

fn by_message_ids(document: &Html) -> TierResult {
    let elements = select_all(document, r#"[data-message-id], [class*="turn"]"#)?;
    if elements.is_empty() {
        return Ok(None);
    }

    let messages = elements
        .into_iter()
        .filter_map(|el| {
            let is_user = el.value().attr("data-author-role") == Some("user")
                || class_contains_any(el, &["user"]);
            let role = if is_user { Role::User } else { Role::Assistant };
            Message::new(role, &inner_text(el))
        })
        .collect();
    Ok(Some(messages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::Page;
    use chrono::{TimeZone, Utc};

    fn page(html: &str) -> Page {
        let at = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap();
        Page::captured(html, "https://gemini.google.com/app/42", at)
    }

    #[test]
    fn test_extract_turn_containers() {
        let page = page(
            r#"
        <div class="conversation-turn query-turn"><p>Explain borrowing</p></div>
        <div class="conversation-turn"><div class="markdown-content">Borrowing lends access.</div></div>
        <div class="chat-message"><span class="user-badge"></span><div class="text-content">Thanks</div></div>
        "#,
        );

        let messages = GeminiExtractor.extract(&page).unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "Explain borrowing");
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, "Borrowing lends access.");
        assert_eq!(messages[2].role, Role::User);
        assert_eq!(messages[2].content, "Thanks");
    }

    #[test]
    fn test_extract_custom_elements() {
        let page = page(
            r#"
        <user-query><div class="query-text">Hi Gemini</div></user-query>
        <model-response><div class="markdown">Hello!</div></model-response>
        "#,
        );

        let messages = GeminiExtractor.extract(&page).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "Hi Gemini");
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, "Hello!");
    }

    #[test]
    fn test_extract_message_ids() {
        let page = page(
            r#"
        <div data-message-id="1" data-author-role="user">First</div>
        <div data-message-id="2">Second</div>
        "#,
        );

        let messages = GeminiExtractor.extract(&page).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[1].role, Role::Assistant);
    }

    #[test]
    fn test_title() {
        let titled = page(r#"<div class="conversation-title">Async Rust</div>"#);
        assert_eq!(GeminiExtractor.title(&titled).unwrap(), "Async Rust");

        let generic = page("<h1>Gemini</h1>");
        assert_eq!(GeminiExtractor.title(&generic).unwrap(), "Gemini-2024-05-20");
    }
}
