//! Persisted chat session types

use crate::error::{ChatResult, ResultExt};
use crate::types::{Role, Turn};
use crate::utils::{char_len, truncate_str};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;
use uuid::Uuid;

/// Prefix of a session title that has not been derived from the conversation yet
pub const DEFAULT_TITLE_PREFIX: &str = "Chat - ";

/// Characters of the first user turn used for a derived title
const TITLE_CHARS: usize = 40;

/// Unique identifier for a session
pub type SessionId = String;

/// A stored conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: SessionId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
    /// Conversation turns, summary first when present
    pub turns: Vec<Turn>,
    /// File the conversation was started from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_file: Option<String>,
}

impl ChatSession {
    /// Create an empty session with a timestamp title
    pub fn new(context_file: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: format!("session_{}", Uuid::new_v4()),
            title: default_title(now),
            created_at: now,
            last_active_at: now,
            turns: Vec::new(),
            context_file,
        }
    }

    /// Whether the title is still the timestamp one
    pub fn has_default_title(&self) -> bool {
        self.title.starts_with(DEFAULT_TITLE_PREFIX)
    }

    /// Replace the turns and refresh the title while it is still the default
    pub fn set_turns(&mut self, turns: &[Turn]) {
        self.turns = turns.to_vec();
        self.touch();

        if self.has_default_title() {
            if let Some(first) = turns.iter().find(|t| t.role == Role::User) {
                self.title = title_from_message(&first.content);
            }
        }
    }

    /// Mark the session as used now
    pub fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }
}

/// Everything a store holds, in a form suitable for persisting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionsSnapshot {
    pub sessions: HashMap<SessionId, ChatSession>,
    pub active_session_id: Option<SessionId>,
}

impl SessionsSnapshot {
    /// Read a snapshot written by [`save`](Self::save); a missing file is empty
    pub async fn load(path: &Path) -> ChatResult<Self> {
        if !fs::try_exists(path).await? {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the snapshot as pretty JSON, creating parent directories
    pub async fn save(&self, path: &Path) -> ChatResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).await?;
        Ok(())
    }
}

/// `"Chat - Oct 19, 3:07 PM"` in local time
pub fn default_title(at: DateTime<Utc>) -> String {
    format!(
        "{}{}",
        DEFAULT_TITLE_PREFIX,
        at.with_timezone(&Local).format("%b %-d, %-I:%M %p")
    )
}

/// Title derived from the first user message
pub fn title_from_message(content: &str) -> String {
    let truncated = truncate_str(content, TITLE_CHARS).trim();
    if char_len(truncated) < char_len(content) {
        format!("{}...", truncated)
    } else {
        truncated.to_string()
    }
}
