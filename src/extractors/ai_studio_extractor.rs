//! Google AI Studio (aistudio.google.com)
//!
//! The history fallback has no role signal at all and assigns roles by
//! position. That guess is best-effort only.

use scraper::Html;

use super::css_extractor::{class_contains_any, content_text, has_within, inner_text, select_all};
use super::{Site, SiteExtractor, Strategy, TierResult, TitleReject};
use crate::markdown::RoleLabels;
use crate::message::{Message, Role};

/// History entries at or below this many characters are UI chrome.
const MIN_HISTORY_CHARS: usize = 10;

static STRATEGIES: [Strategy; 2] = [
    Strategy {
        name: "chat-turns",
        run: by_chat_turns,
    },
    Strategy {
        name: "history-parity",
        run: by_history_parity,
    },
];

static TITLE_CANDIDATES: [&str; 3] = [r#"[class*="project-name"]"#, ".title", "h1"];

#[derive(Debug, Default, Clone, Copy)]
pub struct AiStudioExtractor;

impl SiteExtractor for AiStudioExtractor {
    fn site(&self) -> Site {
        Site::GoogleAiStudio
    }

    fn role_labels(&self) -> RoleLabels {
        RoleLabels::new("User", "Model")
    }

    fn strategies(&self) -> &'static [Strategy] {
        &STRATEGIES
    }

    fn title_candidates(&self) -> &'static [&'static str] {
        &TITLE_CANDIDATES
    }

    fn title_reject(&self) -> TitleReject {
        TitleReject::Contains("AI Studio")
    }
}

fn by_chat_turns(document: &Html) -> TierResult {
    let turns = select_all(
        document,
        r#"[class*="chat-turn"], [class*="message-row"], mat-card[class*="message"], .prompt-response-pair"#,
    )?;
    if turns.is_empty() {
        return Ok(None);
    }

    let mut messages = Vec::with_capacity(turns.len());
    for turn in turns {
        let is_user = class_contains_any(turn, &["user", "prompt"])
            || has_within(turn, r#"[class*="user-icon"], [class*="prompt"]"#)?;
        let role = if is_user { Role::User } else { Role::Assistant };
        let content = content_text(
            turn,
            r#".message-content, .text-content, [class*="markdown"], p"#,
        )?;
        messages.extend(Message::new(role, &content));
    }
    Ok(Some(messages))
}

/// Parity is taken over every candidate, including the ones filtered out.
fn by_history_parity(document: &Html) -> TierResult {
    let entries = select_all(document, r#"[class*="history"] > div, [class*="chat"] > div"#)?;
    if entries.is_empty() {
        return Ok(None);
    }

    let messages = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, el)| {
            let text = inner_text(el);
            if text.chars().count() <= MIN_HISTORY_CHARS {
                return None;
            }
            Message::new(Role::from_parity(index), &text)
        })
        .collect();
    Ok(Some(messages))
}
