//! Context window management for chat conversations
//!
//! This module keeps a conversation and its attached document context under
//! a fixed token budget.
//!
//! # Overview
//!
//! - [`TokenEstimator`]: deterministic character-based token estimate
//! - [`PromptAssembler`]: renders the prompt, trimming document context to fit
//! - [`CompactionEngine`]: collapses older turns into a rolling summary
//! - [`DocumentContext`]: fences the active file and attachments into context text
//!
//! # Example
//!
//! ```rust,ignore
//! use chatwin_core::config::BudgetConfig;
//! use chatwin_core::context::{CompactionEngine, PromptAssembler};
//!
//! let config = BudgetConfig::default();
//! let engine = CompactionEngine::new(config.clone(), summarizer);
//! let report = engine.compact(&turns, &document).await;
//!
//! let prompt = PromptAssembler::new(config.effective_budget())
//!     .assemble(&report.turns, "What changed?", &document);
//! ```

pub mod assembler;
pub mod attachments;
pub mod compact;
pub mod estimator;

pub use assembler::{
    ASSISTANT_CUE, DOCUMENT_BEGIN, DOCUMENT_END, DOCUMENT_PREAMBLE, HISTORY_HEADER,
    PromptAssembler,
};
pub use attachments::DocumentContext;
pub use compact::{
    CompactionEngine, CompactionReport, CompactionStage, CompactionStats, FALLBACK_SUMMARY_TAG,
    LAST_RESORT_SUMMARY_TAG,
};
pub use estimator::TokenEstimator;
