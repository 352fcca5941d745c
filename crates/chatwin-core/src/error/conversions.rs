//! From trait implementations for ChatError conversions

use super::types::ChatError;

impl From<std::io::Error> for ChatError {
    fn from(error: std::io::Error) -> Self {
        Self::storage(error.to_string())
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(error: serde_json::Error) -> Self {
        Self::storage(format!("Invalid JSON: {}", error))
    }
}
