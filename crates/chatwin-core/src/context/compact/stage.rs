//! Compaction stages and the transitions between them

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stage of one compaction pass
///
/// A pass starts at [`CompactionStage::enter`] and advances with
/// [`CompactionStage::after_measure`] until it reaches a terminal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum CompactionStage {
    /// Under budget, nothing to do
    Normal,
    /// Over budget but too few turns to compact
    Skipped,
    /// Collapse older turns into the summary turn
    Compact,
    /// Re-measure the conversation after compaction
    CheckRecentWindow,
    /// Shrink the recent window to `keep` turns
    Shrink { keep: usize },
    /// Keep at most two turns and an ultra-concise summary
    LastResort,
    /// The conversation fits again
    Done,
}

impl CompactionStage {
    /// First stage of a pass
    ///
    /// `total_tokens` covers the conversation plus the external context.
    pub fn enter(total_tokens: usize, budget: usize, turn_count: usize, recent: usize) -> Self {
        if total_tokens <= budget {
            Self::Normal
        } else if turn_count <= recent {
            Self::Skipped
        } else {
            Self::Compact
        }
    }

    /// Stage that follows a measurement of the conversation alone
    ///
    /// Only meaningful after `CheckRecentWindow` and `Shrink`; every other
    /// stage ends the pass.
    pub fn after_measure(
        self,
        message_tokens: usize,
        budget: usize,
        recent: usize,
        min_keep: usize,
    ) -> Self {
        if message_tokens <= budget {
            return Self::Done;
        }
        match self {
            Self::CheckRecentWindow => Self::first_shrink(recent, min_keep),
            Self::Shrink { keep } => Self::shrink_below(keep, min_keep),
            _ => Self::Done,
        }
    }

    /// First shrink stage for a recent window of `recent` turns
    pub fn first_shrink(recent: usize, min_keep: usize) -> Self {
        Self::shrink_below(recent, min_keep)
    }

    fn shrink_below(current: usize, min_keep: usize) -> Self {
        match current.checked_sub(1) {
            Some(keep) if keep >= min_keep && keep > 0 => Self::Shrink { keep },
            _ => Self::LastResort,
        }
    }

    /// Whether no further stage follows this one
    ///
    /// `LastResort` still runs its own step before the pass ends.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Normal | Self::Skipped | Self::LastResort | Self::Done)
    }
}

impl fmt::Display for CompactionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Skipped => write!(f, "skipped"),
            Self::Compact => write!(f, "compact"),
            Self::CheckRecentWindow => write!(f, "check_recent_window"),
            Self::Shrink { keep } => write!(f, "shrink({})", keep),
            Self::LastResort => write!(f, "last_resort"),
            Self::Done => write!(f, "done"),
        }
    }
}
