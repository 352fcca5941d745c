//! Token budget settings

use crate::error::{ChatError, ChatResult};
use serde::{Deserialize, Serialize};

/// Default prompt ceiling in tokens
pub const DEFAULT_MAX_PROMPT_TOKENS: usize = 8192;

/// Default tokens held back for the model's reply
pub const DEFAULT_RESERVED_RESPONSE_TOKENS: usize = 512;

/// Default size of the verbatim recent window
pub const DEFAULT_RECENT_MESSAGES_TO_KEEP: usize = 6;

/// Default floor for the recent window while shrinking
pub const DEFAULT_MIN_RECENT_MESSAGES_TO_KEEP: usize = 2;

/// Default sampling temperature for summarization calls
pub const DEFAULT_SUMMARY_TEMPERATURE: f32 = 0.3;

/// Budget configuration for one conversation
///
/// The effective budget is `max_prompt_tokens - reserved_response_tokens`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Hard ceiling for prompt plus response
    pub max_prompt_tokens: usize,
    /// Tokens reserved for the model's response
    pub reserved_response_tokens: usize,
    /// Turns kept verbatim after compaction
    pub recent_messages_to_keep: usize,
    /// Smallest verbatim window the shrink loop may reach
    pub min_recent_messages_to_keep: usize,
    /// Temperature passed to the summarizer
    pub summary_temperature: f32,
    /// Model name forwarded to the summarizer and responder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            max_prompt_tokens: DEFAULT_MAX_PROMPT_TOKENS,
            reserved_response_tokens: DEFAULT_RESERVED_RESPONSE_TOKENS,
            recent_messages_to_keep: DEFAULT_RECENT_MESSAGES_TO_KEEP,
            min_recent_messages_to_keep: DEFAULT_MIN_RECENT_MESSAGES_TO_KEEP,
            summary_temperature: DEFAULT_SUMMARY_TEMPERATURE,
            model: None,
        }
    }
}

impl BudgetConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Token ceiling for the rendered prompt
    pub fn effective_budget(&self) -> usize {
        self.max_prompt_tokens
            .saturating_sub(self.reserved_response_tokens)
    }

    /// Check the invariants the rest of the crate relies on
    pub fn validate(&self) -> ChatResult<()> {
        let positive = [
            ("max_prompt_tokens", self.max_prompt_tokens),
            ("reserved_response_tokens", self.reserved_response_tokens),
            ("recent_messages_to_keep", self.recent_messages_to_keep),
            (
                "min_recent_messages_to_keep",
                self.min_recent_messages_to_keep,
            ),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ChatError::config_with_context(
                    format!("{} must be at least 1", field),
                    field,
                ));
            }
        }

        if self.reserved_response_tokens >= self.max_prompt_tokens {
            return Err(ChatError::config_with_context(
                format!(
                    "reserved_response_tokens ({}) must be less than max_prompt_tokens ({})",
                    self.reserved_response_tokens, self.max_prompt_tokens
                ),
                "reserved_response_tokens",
            ));
        }

        if self.min_recent_messages_to_keep > self.recent_messages_to_keep {
            return Err(ChatError::config_with_context(
                format!(
                    "min_recent_messages_to_keep ({}) must not exceed recent_messages_to_keep ({})",
                    self.min_recent_messages_to_keep, self.recent_messages_to_keep
                ),
                "min_recent_messages_to_keep",
            ));
        }

        if !self.summary_temperature.is_finite() || self.summary_temperature < 0.0 {
            return Err(ChatError::config_with_context(
                "summary_temperature must be a non-negative number",
                "summary_temperature",
            ));
        }

        Ok(())
    }

    /// Set the prompt ceiling
    pub fn with_max_prompt_tokens(mut self, tokens: usize) -> Self {
        self.max_prompt_tokens = tokens;
        self
    }

    /// Set the reserved response tokens
    pub fn with_reserved_response_tokens(mut self, tokens: usize) -> Self {
        self.reserved_response_tokens = tokens;
        self
    }

    /// Set the verbatim recent window size
    pub fn with_recent_messages_to_keep(mut self, count: usize) -> Self {
        self.recent_messages_to_keep = count;
        self
    }

    /// Set the recent window floor
    pub fn with_min_recent_messages_to_keep(mut self, count: usize) -> Self {
        self.min_recent_messages_to_keep = count;
        self
    }

    /// Set the summarization temperature
    pub fn with_summary_temperature(mut self, temperature: f32) -> Self {
        self.summary_temperature = temperature;
        self
    }

    /// Set the model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}
