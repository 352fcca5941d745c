//! Chat session persistence
//!
//! A [`SessionStore`] keeps conversations between runs. [`SessionManager`] is
//! the in-memory implementation; hosts export its [`SessionsSnapshot`] to
//! whatever storage they own.

pub mod manager;
pub mod store;
pub mod types;

pub use manager::SessionManager;
pub use store::{DEFAULT_RECENT_SESSIONS, SessionStore};
pub use types::{ChatSession, DEFAULT_TITLE_PREFIX, SessionId, SessionsSnapshot};

#[cfg(test)]
pub use store::MockSessionStore;
