//! Budget-driven conversation compaction
//!
//! A pass walks an explicit stage machine:
//!
//! ```text
//! Normal                                   (under budget)
//! Skipped                                  (over budget, too few turns)
//! Compact -> CheckRecentWindow -> Done
//!                              -> Shrink(recent-1) -> ... -> Shrink(min) -> Done
//!                                                                       -> LastResort
//! ```
//!
//! Every summarizer failure is replaced by a deterministic fallback, so a
//! pass always produces a conversation.

mod engine;
mod prompts;
mod report;
mod stage;
mod stats;


pub use engine::CompactionEngine;
pub use prompts::{FALLBACK_SUMMARY_TAG, LAST_RESORT_SUMMARY_TAG};
pub use report::CompactionReport;
pub use stage::CompactionStage;
pub use stats::CompactionStats;
