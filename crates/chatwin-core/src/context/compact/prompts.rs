//! Summarization prompts and deterministic fallback summaries

use crate::types::Turn;
use crate::utils::truncate_str;

/// Tag that opens the fallback summary used when the summarizer fails
pub const FALLBACK_SUMMARY_TAG: &str = "[Summarized due to token limit]";

/// Tag that opens the last-resort fallback summary
pub const LAST_RESORT_SUMMARY_TAG: &str = "[Conversation summary]";

/// Turns quoted in the fallback summary
const FALLBACK_TURNS: usize = 2;

/// Characters quoted per turn in the fallback summary
const FALLBACK_TURN_CHARS: usize = 100;

/// Characters quoted per dropped turn in the last-resort prompt
const LAST_RESORT_TURN_CHARS: usize = 200;

/// Characters of the previous summary kept by the last-resort fallback
const LAST_RESORT_SUMMARY_CHARS: usize = 150;

/// Prompt for the first compaction of older turns
pub fn build_compaction_prompt(previous_summary: &str, to_summarize: &[&Turn]) -> String {
    let mut prompt = String::from(
        "Summarize the conversation so far for an assistant. Keep key facts, constraints, \
         decisions, action items, and unresolved questions. Be concise. Do not invent details.\n\n",
    );

    if !previous_summary.is_empty() {
        prompt.push_str(&format!("Previous summary: {}\n\n", previous_summary));
    }

    if !to_summarize.is_empty() {
        prompt.push_str("Conversation to summarize:\n");
        for turn in to_summarize {
            prompt.push_str(&turn.render());
            prompt.push('\n');
        }
    }

    prompt
}

/// Prompt that folds newly dropped turns into an existing summary
pub fn build_update_prompt(existing_summary: &str, dropped: &[Turn]) -> String {
    let additional = dropped
        .iter()
        .map(Turn::render)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Update this summary with additional context. Keep it concise.\n\n\
         Existing summary: {}\n\nAdditional messages:\n{}",
        existing_summary, additional
    )
}

/// Prompt for the terminal, ultra-concise summary
pub fn build_last_resort_prompt(existing_summary: &str, dropped: &[Turn]) -> String {
    let additional = dropped
        .iter()
        .map(|t| {
            format!(
                "{}: {}",
                t.role.label(),
                truncate_str(&t.content, LAST_RESORT_TURN_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Create an extremely concise summary (max 2-3 sentences) of this conversation.\n\n\
         Existing summary: {}\n\nAdditional messages:\n{}",
        existing_summary, additional
    )
}

/// Summary used when the compaction call fails
///
/// Quotes the previous summary and the first two dropped turns, each cut to
/// 100 characters.
pub fn fallback_summary(previous_summary: &str, to_summarize: &[&Turn]) -> String {
    let quoted = to_summarize
        .iter()
        .take(FALLBACK_TURNS)
        .map(|t| {
            format!(
                "{}: {}...",
                t.role.label(),
                truncate_str(&t.content, FALLBACK_TURN_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join(" ");

    let previous = if previous_summary.is_empty() {
        String::new()
    } else {
        format!("{} ", previous_summary)
    };

    format!("{} {}{}", FALLBACK_SUMMARY_TAG, previous, quoted)
}

/// Summary used when the last-resort call fails
pub fn last_resort_fallback(previous_summary: &str) -> String {
    format!(
        "{} {}",
        LAST_RESORT_SUMMARY_TAG,
        truncate_str(previous_summary, LAST_RESORT_SUMMARY_CHARS)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compaction_prompt_sections() {
        let a = Turn::user("I use tokio 1.38");
        let b = Turn::assistant("Noted.");
        let prompt = build_compaction_prompt("User builds a CLI.", &[&a, &b]);

        assert!(prompt.starts_with("Summarize the conversation so far"));
        assert!(prompt.contains("unresolved questions"));
        assert!(prompt.contains("Previous summary: User builds a CLI.\n\n"));
        assert!(prompt.ends_with("Conversation to summarize:\nUser: I use tokio 1.38\nAssistant: Noted.\n"));
    }

    #[test]
    fn test_compaction_prompt_without_previous() {
        let a = Turn::user("hello");
        let prompt = build_compaction_prompt("", &[&a]);
        assert!(!prompt.contains("Previous summary"));
    }

    #[test]
    fn test_update_prompt() {
        let dropped = vec![Turn::user("q1"), Turn::assistant("a1")];
        let prompt = build_update_prompt("old digest", &dropped);
        assert!(prompt.contains("Existing summary: old digest"));
        assert!(prompt.ends_with("Additional messages:\nUser: q1\nAssistant: a1"));
    }

    #[test]
    fn test_last_resort_prompt_truncates_turns() {
        let dropped = vec![Turn::user("z".repeat(500))];
        let prompt = build_last_resort_prompt("digest", &dropped);
        assert!(prompt.contains("max 2-3 sentences"));
        assert!(prompt.contains(&format!("User: {}", "z".repeat(200))));
        assert!(!prompt.contains(&"z".repeat(201)));
    }

    #[test]
    fn test_fallback_summary_quotes_two_turns() {
        let a = Turn::user("a".repeat(150));
        let b = Turn::assistant("short");
        let c = Turn::user("never quoted");
        let summary = fallback_summary("", &[&a, &b, &c]);

        assert_eq!(
            summary,
            format!(
                "[Summarized due to token limit] User: {}... Assistant: short...",
                "a".repeat(100)
            )
        );
    }

    #[test]
    fn test_fallback_summary_keeps_previous() {
        let a = Turn::user("next");
        let summary = fallback_summary("earlier digest", &[&a]);
        assert_eq!(
            summary,
            "[Summarized due to token limit] earlier digest User: next..."
        );
    }

    #[test]
    fn test_last_resort_fallback() {
        let summary = last_resort_fallback(&"s".repeat(400));
        assert_eq!(summary, format!("[Conversation summary] {}", "s".repeat(150)));
        assert_eq!(last_resort_fallback(""), "[Conversation summary] ");
    }
}
