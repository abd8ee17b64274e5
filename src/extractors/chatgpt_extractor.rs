//! ChatGPT (chatgpt.com, chat.openai.com)

use scraper::Html;

use super::css_extractor::{class_contains_any, content_text, first_within, inner_text, select_all};
use super::{Site, SiteExtractor, Strategy, TierResult, TitleReject};
use crate::markdown::RoleLabels;
use crate::message::{Message, Role};

static STRATEGIES: [Strategy; 2] = [
    Strategy {
        name: "author-role",
        run: by_author_role,
    },
    Strategy {
        name: "conversation-turn",
        run: by_conversation_turn,
    },
];

static TITLE_CANDIDATES: [&str; 3] = [r#"nav [class*="active"] .truncate"#, "h1", "title"];

#[derive(Debug, Default, Clone, Copy)]
pub struct ChatGptExtractor;

impl SiteExtractor for ChatGptExtractor {
    fn site(&self) -> Site {
        Site::ChatGpt
    }

    fn role_labels(&self) -> RoleLabels {
        RoleLabels::new("User", "Assistant")
    }

    fn strategies(&self) -> &'static [Strategy] {
        &STRATEGIES
    }

    fn title_candidates(&self) -> &'static [&'static str] {
        &TITLE_CANDIDATES
    }

    fn title_reject(&self) -> TitleReject {
        TitleReject::Equals("ChatGPT")
    }
}

/// Every element carrying an explicit author attribute is one turn
fn by_author_role(document: &Html) -> TierResult {
    let elements = select_all(document, "[data-message-author-role]")?;
    if elements.is_empty() {
        return Ok(None);
    }

    let messages = elements
        .into_iter()
        .filter_map(|el| {
            let role = Role::from_author(el.value().attr("data-message-author-role").unwrap_or(""));
            Message::new(role, &inner_text(el))
        })
        .collect();
    Ok(Some(messages))
}

/// Turn wrappers without author attributes on the message itself
fn by_conversation_turn(document: &Html) -> TierResult {
    let turns = select_all(document, r#"[data-testid^="conversation-turn"]"#)?;
    if turns.is_empty() {
        return Ok(None);
    }

    let mut messages = Vec::with_capacity(turns.len());
    for turn in turns {
        let role = match first_within(turn, "[data-message-author-role]")? {
            Some(author) => {
                Role::from_author(author.value().attr("data-message-author-role").unwrap_or(""))
            }
            None if class_contains_any(turn, &["user"]) => Role::User,
            None => Role::Assistant,
        };
        let content = content_text(turn, ".markdown, .whitespace-pre-wrap")?;
        messages.extend(Message::new(role, &content));
    }
    Ok(Some(messages))
}
