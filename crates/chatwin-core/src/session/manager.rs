//! In-memory session store

use super::store::SessionStore;
use super::types::{ChatSession, SessionsSnapshot};
use crate::error::ChatResult;
use crate::types::Turn;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// Session store that keeps everything in memory
///
/// Seed it from a previously exported [`SessionsSnapshot`] to resume where a
/// host application left off; call [`SessionStore::export`] to persist.
#[derive(Debug, Default)]
pub struct SessionManager {
    data: RwLock<SessionsSnapshot>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from persisted data
    pub fn from_snapshot(snapshot: SessionsSnapshot) -> Self {
        Self {
            data: RwLock::new(snapshot),
        }
    }

    pub async fn len(&self) -> usize {
        self.data.read().await.sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.sessions.is_empty()
    }
}

fn insert_active(data: &mut SessionsSnapshot, session: &ChatSession) {
    data.sessions.insert(session.id.clone(), session.clone());
    data.active_session_id = Some(session.id.clone());
}

#[async_trait]
impl SessionStore for SessionManager {
    async fn create_session(&self, context_file: Option<String>) -> ChatResult<ChatSession> {
        let session = ChatSession::new(context_file);
        insert_active(&mut *self.data.write().await, &session);
        debug!(session_id = %session.id, "Created session");
        Ok(session)
    }

    async fn active_session(&self) -> ChatResult<ChatSession> {
        let mut data = self.data.write().await;
        if let Some(session) = data
            .active_session_id
            .as_ref()
            .and_then(|id| data.sessions.get(id))
        {
            return Ok(session.clone());
        }

        let session = ChatSession::new(None);
        insert_active(&mut data, &session);
        debug!(session_id = %session.id, "Created session for missing active session");
        Ok(session)
    }

    async fn switch_session(&self, id: &str) -> ChatResult<Option<ChatSession>> {
        let mut data = self.data.write().await;
        let Some(session) = data.sessions.get_mut(id) else {
            return Ok(None);
        };
        session.touch();
        let session = session.clone();
        data.active_session_id = Some(session.id.clone());
        Ok(Some(session))
    }

    async fn update_session(&self, id: &str, turns: &[Turn]) -> ChatResult<()> {
        if let Some(session) = self.data.write().await.sessions.get_mut(id) {
            session.set_turns(turns);
        }
        Ok(())
    }

    async fn delete_session(&self, id: &str) -> ChatResult<()> {
        let mut data = self.data.write().await;
        data.sessions.remove(id);
        if data.active_session_id.as_deref() == Some(id) {
            data.active_session_id = None;
        }
        Ok(())
    }

    async fn recent_sessions(&self, limit: usize) -> ChatResult<Vec<ChatSession>> {
        let data = self.data.read().await;
        let mut sessions: Vec<ChatSession> = data.sessions.values().cloned().collect();
        sessions.sort_by(|a, b| b.last_active_at.cmp(&a.last_active_at));
        sessions.truncate(limit);
        Ok(sessions)
    }

    async fn active_session_id(&self) -> ChatResult<Option<String>> {
        Ok(self.data.read().await.active_session_id.clone())
    }

    async fn export(&self) -> ChatResult<SessionsSnapshot> {
        Ok(self.data.read().await.clone())
    }
}
