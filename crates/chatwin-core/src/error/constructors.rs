//! Constructor methods for ChatError

use super::types::ChatError;

impl ChatError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a new LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            context: None,
        }
    }

    /// Create a new storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            context: None,
        }
    }

    /// Create an invalid input error naming the offending field
    pub fn invalid_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a not found error for a specific resource type
    pub fn not_found(message: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            resource_type: Some(resource_type.into()),
        }
    }

    /// Create a generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
            context: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResultExt;

    #[test]
    fn test_constructors_set_codes() {
        assert_eq!(ChatError::config("bad").error_code(), "CHAT_CONFIG");
        assert_eq!(ChatError::llm("down").error_code(), "CHAT_LLM");
        assert_eq!(ChatError::storage("disk").error_code(), "CHAT_STORAGE");
        assert_eq!(ChatError::Cancelled.error_code(), "CHAT_CANCELLED");
    }

    #[test]
    fn test_context_accessor() {
        let err = ChatError::config_with_context("invalid budget", "max_prompt_tokens");
        assert_eq!(err.context(), Some("max_prompt_tokens"));
        assert_eq!(err.to_string(), "Configuration error: invalid budget");

        let err = ChatError::invalid_field("must be >= 1", "recent_messages_to_keep");
        assert_eq!(err.context(), Some("recent_messages_to_keep"));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ChatError::llm("connection reset by peer").is_retryable());
        assert!(ChatError::llm("HTTP 429 rate limit").is_retryable());
        assert!(!ChatError::llm("model not found").is_retryable());
        assert!(!ChatError::config("bad").is_retryable());
    }

    #[test]
    fn test_result_ext() {
        let res: Result<(), &str> = Err("boom");
        let err = res.context("loading config").unwrap_err();
        assert_eq!(err.to_string(), "Error: loading config: boom");

        let res: Result<(), &str> = Err("denied");
        let err = res.with_context(|| format!("writing {}", "sessions.json")).unwrap_err();
        assert_eq!(err.to_string(), "Error: writing sessions.json: denied");
    }
}
