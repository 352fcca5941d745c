//! Outcome of a compaction pass

use super::stage::CompactionStage;
use crate::types::Turn;
use serde::{Deserialize, Serialize};

/// What one compaction pass did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactionReport {
    /// The conversation after the pass
    pub turns: Vec<Turn>,
    /// Every stage the pass went through, in order
    pub stage_trace: Vec<CompactionStage>,
    /// Stage the pass ended in
    pub final_stage: CompactionStage,
    /// Summarizer calls made during the pass
    pub summarizer_calls: usize,
    /// Summarizer calls that failed and fell back
    pub summarizer_failures: usize,
    pub turns_before: usize,
    pub turns_after: usize,
    /// Conversation tokens before the pass (context excluded)
    pub tokens_before: usize,
    /// Conversation tokens after the pass (context excluded)
    pub tokens_after: usize,
    /// Conversation alone still exceeds the effective budget
    pub over_budget: bool,
}

impl CompactionReport {
    /// Report for a pass that left the conversation unchanged
    pub fn unchanged(
        turns: Vec<Turn>,
        stage: CompactionStage,
        tokens: usize,
        over_budget: bool,
    ) -> Self {
        let count = turns.len();
        Self {
            turns,
            stage_trace: vec![stage],
            final_stage: stage,
            summarizer_calls: 0,
            summarizer_failures: 0,
            turns_before: count,
            turns_after: count,
            tokens_before: tokens,
            tokens_after: tokens,
            over_budget,
        }
    }

    /// Whether older turns were collapsed into a summary
    pub fn was_compacted(&self) -> bool {
        self.stage_trace.contains(&CompactionStage::Compact)
    }

    /// Tokens removed from the conversation
    pub fn tokens_saved(&self) -> usize {
        self.tokens_before.saturating_sub(self.tokens_after)
    }

    /// Window sizes tried by the shrink stages, in order
    pub fn shrink_windows(&self) -> Vec<usize> {
        self.stage_trace
            .iter()
            .filter_map(|stage| match stage {
                CompactionStage::Shrink { keep } => Some(*keep),
                _ => None,
            })
            .collect()
    }
}
