//! Core error type for chatwin

use thiserror::Error;

/// Result type alias for chatwin operations
pub type ChatResult<T> = Result<T, ChatError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context<C: std::fmt::Display>(self, context: C) -> ChatResult<T>;

    /// Add context lazily (only evaluated on error)
    fn with_context<C: std::fmt::Display, F: FnOnce() -> C>(self, f: F) -> ChatResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context<C: std::fmt::Display>(self, context: C) -> ChatResult<T> {
        self.map_err(|e| ChatError::other(format!("{}: {}", context, e)))
    }

    fn with_context<C: std::fmt::Display, F: FnOnce() -> C>(self, f: F) -> ChatResult<T> {
        self.map_err(|e| ChatError::other(format!("{}: {}", f(), e)))
    }
}

/// Main error type for chatwin
#[derive(Error, Debug, Clone)]
pub enum ChatError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// LLM call errors (summarizer or responder)
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        context: Option<String>,
    },

    /// Session storage errors
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        context: Option<String>,
    },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
    },

    /// Resource not found
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        resource_type: Option<String>,
    },

    /// Request was cancelled
    #[error("Request was cancelled")]
    Cancelled,

    /// Generic error with context
    #[error("Error: {message}")]
    Other {
        message: String,
        context: Option<String>,
    },
}

impl ChatError {
    /// Short machine-readable code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "CHAT_CONFIG",
            Self::Llm { .. } => "CHAT_LLM",
            Self::Storage { .. } => "CHAT_STORAGE",
            Self::InvalidInput { .. } => "CHAT_INVALID_INPUT",
            Self::NotFound { .. } => "CHAT_NOT_FOUND",
            Self::Cancelled => "CHAT_CANCELLED",
            Self::Other { .. } => "CHAT_OTHER",
        }
    }

    /// Additional context attached to the error, if any
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. }
            | Self::Llm { context, .. }
            | Self::Storage { context, .. }
            | Self::Other { context, .. } => context.as_deref(),
            Self::InvalidInput { field, .. } => field.as_deref(),
            Self::NotFound { resource_type, .. } => resource_type.as_deref(),
            Self::Cancelled => None,
        }
    }

    /// Whether retrying the same call could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Llm { message, .. } => {
                let lower = message.to_lowercase();
                lower.contains("timeout")
                    || lower.contains("rate limit")
                    || lower.contains("429")
                    || lower.contains("503")
                    || lower.contains("connection")
            }
            Self::Storage { .. } => true,
            _ => false,
        }
    }
}
