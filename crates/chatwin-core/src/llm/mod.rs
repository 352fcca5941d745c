//! LLM capability interfaces
//!
//! The core never talks to a model directly. It consumes two narrow
//! capabilities supplied by the caller:
//!
//! - [`Summarizer`]: one-shot text generation used by compaction
//! - [`Responder`]: streamed generation used for the primary reply
//!
//! A single transport adapter usually implements both.

pub mod options;
pub mod streaming;

pub use options::{GenerateOptions, StreamOptions};
pub use streaming::{TextStream, collect_stream};

use crate::error::ChatResult;
use async_trait::async_trait;

/// Non-streaming generation used to produce conversation summaries
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Generate a complete response for `prompt`
    ///
    /// Failures are never retried by the caller; compaction falls back to a
    /// deterministic summary instead.
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> ChatResult<String>;
}

/// Streaming generation used for the assistant reply
#[async_trait]
pub trait Responder: Send + Sync {
    /// Start streaming a response for `prompt`
    ///
    /// Chunks must be yielded in arrival order. An error either here or as
    /// a stream item is surfaced to the caller of `send_message`.
    async fn stream(&self, prompt: &str, options: &StreamOptions) -> ChatResult<TextStream>;
}
