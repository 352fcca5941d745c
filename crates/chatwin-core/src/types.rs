//! Conversation turn types

use serde::{Deserialize, Serialize};

/// Role of a turn in the conversation
///
/// `System` is reserved for the rolling summary produced by compaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Rolling conversation summary
    System,
    /// Human input
    User,
    /// Model response
    Assistant,
}

impl Role {
    /// Label used when a turn is rendered into prompt text
    ///
    /// Anything that is not a user turn renders as `Assistant`.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant | Role::System => "Assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who produced the turn
    pub role: Role,
    /// Text content
    pub content: String,
}

impl Turn {
    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Create the summary turn
    pub fn summary(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Whether this is the summary turn
    pub fn is_summary(&self) -> bool {
        self.role == Role::System
    }

    /// `"User: ..."` / `"Assistant: ..."` rendering without a trailing newline
    pub fn render(&self) -> String {
        format!("{}: {}", self.role.label(), self.content)
    }
}

/// Split a conversation into its summary text (if element 0 is a summary) and
/// the remaining turns.
pub fn split_summary(turns: &[Turn]) -> (Option<&str>, &[Turn]) {
    match turns.split_first() {
        Some((first, rest)) if first.is_summary() => (Some(first.content.as_str()), rest),
        _ => (None, turns),
    }
}

/// Check the summary-first invariant: at most one system turn, and only at index 0
pub fn has_valid_summary_position(turns: &[Turn]) -> bool {
    turns
        .iter()
        .enumerate()
        .all(|(i, t)| !t.is_summary() || i == 0)
}
