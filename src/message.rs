//! Normalized conversation model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Speaker of a turn. Every site-specific signal collapses into one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Map an explicit author attribute. Anything other than `user` is the model.
    pub fn from_author(author: &str) -> Self {
        if author.trim().eq_ignore_ascii_case("user") {
            Role::User
        } else {
            Role::Assistant
        }
    }

    /// Last-resort positional guess: even positions are the user.
    pub fn from_parity(index: usize) -> Self {
        if index % 2 == 0 {
            Role::User
        } else {
            Role::Assistant
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One turn of a conversation, content always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Build a message from captured text, or `None` if it is blank.
    pub fn new(role: Role, content: &str) -> Option<Self> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }
        Some(Self {
            role,
            content: content.to_string(),
        })
    }

    /// `"{role}: {content}"`, the form used in inference prompts.
    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.role, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_content_rejected() {
        assert!(Message::new(Role::User, "").is_none());
        assert!(Message::new(Role::User, "  \n\t ").is_none());

        let msg = Message::new(Role::Assistant, "  Hi there \n").unwrap();
        assert_eq!(msg.content, "Hi there");
    }

    #[test]
    fn test_role_mapping() {
        assert_eq!(Role::from_author("user"), Role::User);
        assert_eq!(Role::from_author("assistant"), Role::Assistant);
        assert_eq!(Role::from_author("tool"), Role::Assistant);

        assert_eq!(Role::from_parity(0), Role::User);
        assert_eq!(Role::from_parity(1), Role::Assistant);
        assert_eq!(Role::from_parity(4), Role::User);
    }

    #[test]
    fn test_serde_shape() {
        let msg = Message::new(Role::User, "Hello").unwrap();
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"Hello"}"#);
        assert_eq!(msg.transcript_line(), "user: Hello");
    }
}
