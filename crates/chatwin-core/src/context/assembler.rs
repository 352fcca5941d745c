//! Prompt assembly
//!
//! Renders the literal prompt sent to the responder. Every piece is measured
//! with [`TokenEstimator`] on its exact rendered text, and whatever budget the
//! conversation leaves over goes to the document context, trimmed to fit.

use super::estimator::TokenEstimator;
use crate::types::{Role, Turn, split_summary};
use crate::utils::{char_len, truncate_str};

/// Opening line of the document wrapper
pub const DOCUMENT_PREAMBLE: &str =
    "You are a helpful assistant. You have access to the following document:\n\n";

/// Marker before the document body
pub const DOCUMENT_BEGIN: &str = "--- BEGIN DOCUMENT ---\n";

/// Marker after the document body
pub const DOCUMENT_END: &str = "\n--- END DOCUMENT ---\n\n";

/// Header of the verbatim history block
pub const HISTORY_HEADER: &str = "Previous conversation:\n";

/// Trailing cue that hands the turn to the model
pub const ASSISTANT_CUE: &str = "Assistant:";

/// Proportion kept on each shrink step while fitting the document
const SHRINK_NUMERATOR: usize = 9;
const SHRINK_DENOMINATOR: usize = 10;

/// An assembled prompt with the numbers that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPrompt {
    /// Final prompt text
    pub text: String,
    /// Tokens used by summary, history, user line and cue
    pub messages_tokens: usize,
    /// Characters of document context included
    pub context_chars: usize,
    /// Whether the document context was cut
    pub context_truncated: bool,
}

/// Builds prompts under a fixed token budget
#[derive(Debug, Clone, Copy)]
pub struct PromptAssembler {
    effective_budget: usize,
}

impl PromptAssembler {
    /// Create an assembler for the given effective budget
    pub fn new(effective_budget: usize) -> Self {
        Self { effective_budget }
    }

    /// Token ceiling this assembler renders against
    pub fn effective_budget(&self) -> usize {
        self.effective_budget
    }

    /// Render the prompt text
    ///
    /// `turns` may or may not already end with the in-flight user turn; the
    /// current message is rendered once, as the final user line.
    pub fn assemble(&self, turns: &[Turn], user_message: &str, context: &str) -> String {
        self.build(turns, user_message, context).text
    }

    /// Render the prompt and report how the budget was spent
    pub fn build(&self, turns: &[Turn], user_message: &str, context: &str) -> AssembledPrompt {
        let (summary, rest) = split_summary(turns);
        let summary = summary.filter(|s| !s.is_empty());
        let history: Vec<&Turn> = strip_in_flight(rest, user_message)
            .iter()
            .filter(|t| t.role != Role::System)
            .collect();

        let summary_text = summary.map(summary_line);
        let history_lines: Vec<String> = history.iter().map(|t| history_line(t)).collect();
        let current_line = user_line(user_message);

        let mut messages_tokens = 0;
        if let Some(line) = &summary_text {
            messages_tokens += TokenEstimator::estimate_text(line);
        }
        if !history_lines.is_empty() {
            messages_tokens += TokenEstimator::estimate_text(HISTORY_HEADER);
            messages_tokens += history_lines
                .iter()
                .map(|l| TokenEstimator::estimate_text(l))
                .sum::<usize>();
            messages_tokens += TokenEstimator::estimate_text("\n");
        }
        messages_tokens += TokenEstimator::estimate_text(&current_line);
        messages_tokens += TokenEstimator::estimate_text(ASSISTANT_CUE);

        let remaining = self.effective_budget.saturating_sub(messages_tokens);
        let trimmed = fit_context(context, remaining);

        let mut text = String::new();
        if !trimmed.is_empty() {
            text.push_str(DOCUMENT_PREAMBLE);
            text.push_str(DOCUMENT_BEGIN);
            text.push_str(trimmed);
            text.push_str(DOCUMENT_END);
        }
        if let Some(line) = &summary_text {
            text.push_str(line);
        }
        if !history_lines.is_empty() {
            text.push_str(HISTORY_HEADER);
            for line in &history_lines {
                text.push_str(line);
            }
            text.push('\n');
        }
        text.push_str(&current_line);
        text.push_str(ASSISTANT_CUE);

        let context_chars = char_len(trimmed);
        if context_chars < char_len(context) && !context.trim().is_empty() {
            tracing::debug!(
                "Document context trimmed to {} of {} chars ({} tokens left after messages)",
                context_chars,
                char_len(context),
                remaining
            );
        }

        AssembledPrompt {
            text,
            messages_tokens,
            context_chars,
            context_truncated: !context.trim().is_empty() && trimmed.len() < context.len(),
        }
    }

    /// Tokens taken by the document wrapper with an empty body
    pub fn context_overhead() -> usize {
        TokenEstimator::estimate_text(&format!(
            "{}{}{}",
            DOCUMENT_PREAMBLE, DOCUMENT_BEGIN, DOCUMENT_END
        ))
    }
}

/// Drop the trailing turn when it is the in-flight user message
fn strip_in_flight<'a>(turns: &'a [Turn], user_message: &str) -> &'a [Turn] {
    match turns.split_last() {
        Some((last, rest)) if last.role == Role::User && last.content == user_message => rest,
        _ => turns,
    }
}

/// Cut `context` so that it plus the wrapper fits in `remaining` tokens
fn fit_context(context: &str, remaining: usize) -> &str {
    let overhead = PromptAssembler::context_overhead();
    if context.trim().is_empty() || remaining <= overhead {
        return "";
    }

    let max_chars = (remaining - overhead) * TokenEstimator::CHARS_PER_TOKEN;
    let mut slice = truncate_str(context, max_chars);
    while !slice.is_empty() && TokenEstimator::estimate_text(slice) + overhead > remaining {
        let len = char_len(slice);
        slice = truncate_str(slice, len * SHRINK_NUMERATOR / SHRINK_DENOMINATOR);
    }
    slice
}

fn summary_line(summary: &str) -> String {
    format!("Conversation summary: {}\n\n", summary)
}

fn history_line(turn: &Turn) -> String {
    format!("{}\n", turn.render())
}

fn user_line(user_message: &str) -> String {
    format!("User: {}\n", user_message)
}
