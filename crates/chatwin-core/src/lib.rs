//! Chatwin Core Library
//!
//! Keeps an LLM chat conversation inside a fixed prompt budget: token
//! estimation, prompt assembly with document context, staged compaction of
//! older turns into a rolling summary, and session persistence.

pub mod config;
pub mod context;
pub mod conversation;
pub mod error;
pub mod llm;
pub mod session;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::BudgetConfig;
pub use context::{
    CompactionEngine, CompactionReport, CompactionStage, CompactionStats, DocumentContext,
    PromptAssembler, TokenEstimator,
};
pub use conversation::{ConversationController, Reply};
pub use error::{ChatError, ChatResult};
pub use llm::{GenerateOptions, Responder, StreamOptions, Summarizer, TextStream};
pub use session::{ChatSession, SessionManager, SessionStore, SessionsSnapshot};
pub use types::{Role, Turn};
