//! Markdown transcript rendering

use crate::message::{Message, Role};

/// Horizontal rule closing every rendered message
pub const SEPARATOR: &str = "---";

/// Header labels for the two roles of one site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleLabels {
    pub user: &'static str,
    pub assistant: &'static str,
}

impl RoleLabels {
    pub const fn new(user: &'static str, assistant: &'static str) -> Self {
        Self { user, assistant }
    }

    pub fn label(&self, role: Role) -> &'static str {
        match role {
            Role::User => self.user,
            Role::Assistant => self.assistant,
        }
    }
}

/// Render messages in order as role-labelled sections.
///
/// Content is emitted verbatim; nothing is escaped.
pub fn render(messages: &[Message], labels: RoleLabels) -> String {
    let mut markdown = String::new();
    for msg in messages {
        markdown.push_str("### **");
        markdown.push_str(labels.label(msg.role));
        markdown.push_str("**\n\n");
        markdown.push_str(&msg.content);
        markdown.push_str("\n\n");
        markdown.push_str(SEPARATOR);
        markdown.push_str("\n\n");
    }
    markdown
}
