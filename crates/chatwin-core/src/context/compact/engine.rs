//! Compaction engine driving the stage machine

use super::prompts::{
    build_compaction_prompt, build_last_resort_prompt, build_update_prompt, fallback_summary,
    last_resort_fallback,
};
use super::report::CompactionReport;
use super::stage::CompactionStage;
use crate::config::BudgetConfig;
use crate::context::estimator::TokenEstimator;
use crate::llm::{GenerateOptions, Summarizer};
use crate::types::{Turn, split_summary};
use crate::utils::truncate_with_ellipsis;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns kept verbatim by the last-resort stage
const LAST_RESORT_KEEP: usize = 2;

/// Keeps a conversation under the effective prompt budget
///
/// Older turns are collapsed into a single summary turn at position 0. When
/// the recent window alone is still too large, the window shrinks one turn
/// at a time, and finally only the last two turns survive next to an
/// ultra-concise summary.
pub struct CompactionEngine {
    config: BudgetConfig,
    summarizer: Arc<dyn Summarizer>,
}

/// Mutable state of a single pass
struct Pass {
    turns: Vec<Turn>,
    calls: CallCount,
}

#[derive(Default)]
struct CallCount {
    total: usize,
    failed: usize,
}

impl CompactionEngine {
    pub fn new(config: BudgetConfig, summarizer: Arc<dyn Summarizer>) -> Self {
        Self { config, summarizer }
    }

    pub fn config(&self) -> &BudgetConfig {
        &self.config
    }

    /// Whether the conversation plus context exceeds the effective budget
    pub fn needs_compaction(&self, turns: &[Turn], context: &str) -> bool {
        TokenEstimator::estimate_turns(turns) + TokenEstimator::estimate_text(context)
            > self.config.effective_budget()
    }

    /// Run one compaction pass
    ///
    /// Never fails: summarizer errors are replaced by deterministic fallback
    /// summaries, and a conversation that cannot be brought under budget is
    /// returned as-is with `over_budget` set.
    pub async fn compact(&self, turns: &[Turn], context: &str) -> CompactionReport {
        let budget = self.config.effective_budget();
        let recent = self.config.recent_messages_to_keep;
        let min_keep = self.config.min_recent_messages_to_keep;

        let tokens_before = TokenEstimator::estimate_turns(turns);
        let total = tokens_before + TokenEstimator::estimate_text(context);

        let mut stage = CompactionStage::enter(total, budget, turns.len(), recent);
        match stage {
            CompactionStage::Normal => {
                return CompactionReport::unchanged(turns.to_vec(), stage, tokens_before, false);
            }
            CompactionStage::Skipped => {
                debug!(
                    turns = turns.len(),
                    recent,
                    total_tokens = total,
                    budget,
                    "Over budget but not enough history to compact"
                );
                return CompactionReport::unchanged(
                    turns.to_vec(),
                    stage,
                    tokens_before,
                    tokens_before > budget,
                );
            }
            _ => {}
        }

        let mut pass = Pass {
            turns: turns.to_vec(),
            calls: CallCount::default(),
        };
        let mut trace = vec![stage];

        while !stage.is_terminal() {
            debug!(stage = %stage, turns = pass.turns.len(), "Compaction stage");
            let next = match stage {
                CompactionStage::Compact => {
                    self.compact_older(&mut pass, recent).await;
                    CompactionStage::CheckRecentWindow
                }
                CompactionStage::CheckRecentWindow => stage.after_measure(
                    TokenEstimator::estimate_turns(&pass.turns),
                    budget,
                    recent,
                    min_keep,
                ),
                CompactionStage::Shrink { keep } => {
                    self.shrink_window(&mut pass, keep).await;
                    stage.after_measure(
                        TokenEstimator::estimate_turns(&pass.turns),
                        budget,
                        recent,
                        min_keep,
                    )
                }
                CompactionStage::Normal
                | CompactionStage::Skipped
                | CompactionStage::LastResort
                | CompactionStage::Done => break,
            };
            trace.push(next);
            stage = next;
        }

        if stage == CompactionStage::LastResort {
            debug!(stage = %stage, turns = pass.turns.len(), "Compaction stage");
            self.last_resort(&mut pass).await;
        }

        let tokens_after = TokenEstimator::estimate_turns(&pass.turns);
        let over_budget = tokens_after > budget;
        if over_budget {
            warn!(
                tokens = tokens_after,
                budget, "Conversation still exceeds budget after last-resort compaction"
            );
        }

        info!(
            turns_before = turns.len(),
            turns_after = pass.turns.len(),
            tokens_before,
            tokens_after,
            summarizer_calls = pass.calls.total,
            final_stage = %stage,
            "Conversation compacted"
        );

        CompactionReport {
            turns_before: turns.len(),
            turns_after: pass.turns.len(),
            turns: pass.turns,
            stage_trace: trace,
            final_stage: stage,
            summarizer_calls: pass.calls.total,
            summarizer_failures: pass.calls.failed,
            tokens_before,
            tokens_after,
            over_budget,
        }
    }

    /// Collapse everything but the last `recent` turns into the summary turn
    async fn compact_older(&self, pass: &mut Pass, recent: usize) {
        let split = pass.turns.len().saturating_sub(recent);
        let (older, recent_turns) = pass.turns.split_at(split);

        let previous = older
            .iter()
            .find(|t| t.is_summary())
            .map(|t| t.content.as_str())
            .unwrap_or("");
        let to_summarize: Vec<&Turn> = older.iter().filter(|t| !t.is_summary()).collect();

        let summary = if to_summarize.is_empty() && !previous.is_empty() {
            debug!("No new turns to summarize, reusing previous summary");
            previous.to_string()
        } else {
            let prompt = build_compaction_prompt(previous, &to_summarize);
            match self.summarize(&mut pass.calls, &prompt).await {
                Some(text) => text,
                None => fallback_summary(previous, &to_summarize),
            }
        };

        let mut next = Vec::with_capacity(recent_turns.len() + 1);
        next.push(Turn::summary(summary));
        next.extend_from_slice(recent_turns);
        pass.turns = next;
    }

    /// Keep `keep` turns verbatim and fold the rest into the current summary
    async fn shrink_window(&self, pass: &mut Pass, keep: usize) {
        let (summary, rest) = split_summary(&pass.turns);
        let split = rest.len().saturating_sub(keep);
        let (dropped, kept) = rest.split_at(split);

        if dropped.is_empty() {
            return;
        }

        let current = summary.unwrap_or("");
        let prompt = build_update_prompt(current, dropped);
        let updated = match self.summarize(&mut pass.calls, &prompt).await {
            Some(text) => text,
            None => current.to_string(),
        };

        let mut next = Vec::with_capacity(kept.len() + 1);
        next.push(Turn::summary(updated));
        next.extend_from_slice(kept);
        pass.turns = next;
    }

    /// Keep at most two turns next to an ultra-concise summary
    ///
    /// An existing summary is always condensed again, even when the window
    /// already holds two turns or fewer.
    async fn last_resort(&self, pass: &mut Pass) {
        let (summary, rest) = split_summary(&pass.turns);
        let keep = LAST_RESORT_KEEP.min(rest.len());
        let (dropped, kept) = rest.split_at(rest.len() - keep);

        if summary.is_none() && dropped.is_empty() {
            return;
        }

        let current = summary.unwrap_or("");
        let prompt = build_last_resort_prompt(current, dropped);
        let final_summary = match self.summarize(&mut pass.calls, &prompt).await {
            Some(text) => text,
            None => last_resort_fallback(current),
        };

        let mut next = Vec::with_capacity(kept.len() + 1);
        next.push(Turn::summary(final_summary));
        next.extend_from_slice(kept);
        pass.turns = next;
    }

    /// Call the summarizer, returning `None` on failure
    async fn summarize(&self, calls: &mut CallCount, prompt: &str) -> Option<String> {
        let options = GenerateOptions::with_temperature(self.config.summary_temperature)
            .model(self.config.model.clone());

        calls.total += 1;
        match self.summarizer.generate(prompt, &options).await {
            Ok(text) => {
                let text = text.trim().to_string();
                debug!(preview = %truncate_with_ellipsis(&text, 80), "Summary generated");
                Some(text)
            }
            Err(e) => {
                calls.failed += 1;
                warn!(error = %e, "Summarizer failed, using fallback summary");
                None
            }
        }
    }
}
