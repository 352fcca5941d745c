//! Per-call options for LLM capabilities

use tokio_util::sync::CancellationToken;

/// Options for a [`Summarizer::generate`](super::Summarizer::generate) call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    /// Model override
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
}

impl GenerateOptions {
    /// Options with only a temperature set
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            model: None,
            temperature: Some(temperature),
        }
    }

    /// Set the model
    pub fn model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }
}

/// Options for a [`Responder::stream`](super::Responder::stream) call
#[derive(Debug, Clone, Default)]
pub struct StreamOptions {
    /// Model override
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Cancellation signal; the controller stops reading when it fires
    pub cancel: Option<CancellationToken>,
}

impl StreamOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Attach a cancellation token
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|t| t.is_cancelled())
    }
}
