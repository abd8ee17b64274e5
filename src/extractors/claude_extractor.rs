//! Claude (claude.ai)

use scraper::Html;

use super::css_extractor::{
    class_contains_any, content_text, has_within, inner_text, select_all, select_first,
    select_within,
};
use super::{Site, SiteExtractor, Strategy, TierResult, TitleReject};
use crate::markdown::RoleLabels;
use crate::message::{Message, Role};

static STRATEGIES: [Strategy; 3] = [
    Strategy {
        name: "test-id-turns",
        run: by_test_id,
    },
    Strategy {
        name: "font-classes",
        run: by_font_class,
    },
    Strategy {
        name: "conversation-blocks",
        run: by_conversation_blocks,
    },
];

static TITLE_CANDIDATES: [&str; 3] = [r#"[class*="ConversationTitle"]"#, "h1", "title"];

#[derive(Debug, Default, Clone, Copy)]
pub struct ClaudeExtractor;

impl SiteExtractor for ClaudeExtractor {
    fn site(&self) -> Site {
        Site::Claude
    }

    fn role_labels(&self) -> RoleLabels {
        RoleLabels::new("Human", "Claude")
    }

    fn strategies(&self) -> &'static [Strategy] {
        &STRATEGIES
    }

    fn title_candidates(&self) -> &'static [&'static str] {
        &TITLE_CANDIDATES
    }

    fn title_reject(&self) -> TitleReject {
        TitleReject::Contains("Claude")
    }
}

fn by_test_id(document: &Html) -> TierResult {
    let turns = select_all(document, r#"[data-testid="human-turn"], [data-testid="ai-turn"]"#)?;
    if turns.is_empty() {
        return Ok(None);
    }

    let mut messages = Vec::with_capacity(turns.len());
    for turn in turns {
        let role = if turn.value().attr("data-testid") == Some("human-turn") {
            Role::User
        } else {
            Role::Assistant
        };
        let content = content_text(turn, ".whitespace-pre-wrap, .prose, p")?;
        messages.extend(Message::new(role, &content));
    }
    Ok(Some(messages))
}

fn by_font_class(document: &Html) -> TierResult {
    let blocks = select_all(document, ".font-user-message, .font-claude-message")?;
    if blocks.is_empty() {
        return Ok(None);
    }

    let messages = blocks
        .into_iter()
        .filter_map(|block| {
            let role = if class_contains_any(block, &["font-user-message"]) {
                Role::User
            } else {
                Role::Assistant
            };
            Message::new(role, &inner_text(block))
        })
        .collect();
    Ok(Some(messages))
}

/// Structural guess inside the conversation container
fn by_conversation_blocks(document: &Html) -> TierResult {
    let Some(container) = select_first(document, r#"[class*="conversation"], main"#)? else {
        return Ok(None);
    };
    let blocks = select_within(container, r#"[class*="message"], [class*="turn"]"#)?;
    if blocks.is_empty() {
        return Ok(None);
    }

    let mut messages = Vec::with_capacity(blocks.len());
    for block in blocks {
        let is_user = class_contains_any(block, &["human", "user"])
            || has_within(block, r#"[class*="human"]"#)?;
        let role = if is_user { Role::User } else { Role::Assistant };
        messages.extend(Message::new(role, &inner_text(block)));
    }
    Ok(Some(messages))
}
