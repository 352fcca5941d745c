//! Session persistence boundary

use super::types::{ChatSession, SessionsSnapshot};
use crate::error::ChatResult;
use crate::types::Turn;
use async_trait::async_trait;

/// Default number of sessions returned by [`SessionStore::recent_sessions`]
pub const DEFAULT_RECENT_SESSIONS: usize = 15;

/// Where conversations are kept between runs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a session and make it active
    async fn create_session(&self, context_file: Option<String>) -> ChatResult<ChatSession>;

    /// The active session, creating one if there is none
    async fn active_session(&self) -> ChatResult<ChatSession>;

    /// Make `id` the active session; `None` if it does not exist
    async fn switch_session(&self, id: &str) -> ChatResult<Option<ChatSession>>;

    /// Store the conversation of `id`; unknown ids are ignored
    async fn update_session(&self, id: &str, turns: &[Turn]) -> ChatResult<()>;

    /// Remove a session; unknown ids are ignored
    async fn delete_session(&self, id: &str) -> ChatResult<()>;

    /// Sessions ordered by last activity, most recent first
    async fn recent_sessions(&self, limit: usize) -> ChatResult<Vec<ChatSession>>;

    async fn active_session_id(&self) -> ChatResult<Option<String>>;

    /// Copy of everything stored
    async fn export(&self) -> ChatResult<SessionsSnapshot>;
}
