//! Cumulative statistics across compaction passes

use super::report::CompactionReport;
use super::stage::CompactionStage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Running totals kept by a conversation controller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompactionStats {
    /// Compaction passes run, including no-ops
    pub passes: u64,
    /// Passes that collapsed older turns into a summary
    pub total_compactions: u64,
    /// Passes that were over budget with too few turns to compact
    pub skipped_count: u64,
    /// Summarizer calls that failed and fell back
    pub summarizer_failures: u64,
    /// Conversation tokens removed across all passes
    pub total_tokens_saved: u64,
    /// When the last compaction happened
    pub last_compaction: Option<DateTime<Utc>>,
}

impl CompactionStats {
    /// Fold one pass into the totals
    pub fn record(&mut self, report: &CompactionReport) {
        self.passes += 1;
        self.summarizer_failures += report.summarizer_failures as u64;

        if report.final_stage == CompactionStage::Skipped {
            self.skipped_count += 1;
        }

        if report.was_compacted() {
            self.total_compactions += 1;
            self.total_tokens_saved += report.tokens_saved() as u64;
            self.last_compaction = Some(Utc::now());
        }
    }
}
