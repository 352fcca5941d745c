//! Token estimation
//!
//! Every budget decision in the crate is measured with this heuristic, not
//! with a real tokenizer: ~4 characters per token plus a 5% safety margin.

use crate::types::Turn;
use crate::utils::char_len;

/// Deterministic character-based token estimator
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenEstimator;

impl TokenEstimator {
    /// Characters per token
    pub const CHARS_PER_TOKEN: usize = 4;

    /// Safety margin divisor: `ceil(base * 0.05) == ceil(base / 20)`
    const MARGIN_DIVISOR: usize = 20;

    /// Overhead tokens per turn (role label)
    pub const TURN_OVERHEAD: usize = 2;

    /// Estimate tokens for a string
    ///
    /// ```
    /// use chatwin_core::context::TokenEstimator;
    ///
    /// assert_eq!(TokenEstimator::estimate_text(""), 0);
    /// assert_eq!(TokenEstimator::estimate_text("abcd"), 2);
    /// ```
    pub fn estimate_text(text: &str) -> usize {
        let chars = char_len(text);
        if chars == 0 {
            return 0;
        }
        let base = chars.div_ceil(Self::CHARS_PER_TOKEN);
        base + base.div_ceil(Self::MARGIN_DIVISOR)
    }

    /// Estimate tokens for a single turn, including its role overhead
    pub fn estimate_turn(turn: &Turn) -> usize {
        Self::estimate_text(&turn.content) + Self::TURN_OVERHEAD
    }

    /// Estimate total tokens for a list of turns
    pub fn estimate_turns(turns: &[Turn]) -> usize {
        turns.iter().map(Self::estimate_turn).sum()
    }
}
