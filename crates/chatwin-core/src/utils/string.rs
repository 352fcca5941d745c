//! String utility functions
//!
//! All lengths in this crate are measured in Unicode scalar values, so every
//! cut made here lands on a character boundary.

/// Number of characters in `s`
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Truncate string at character boundary (UTF-8 safe)
///
/// Returns a slice containing at most `max_chars` characters.
///
/// ```
/// use chatwin_core::utils::truncate_str;
///
/// assert_eq!(truncate_str("héllo", 2), "hé");
/// assert_eq!(truncate_str("hi", 10), "hi");
/// ```
pub fn truncate_str(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Truncate string and add ellipsis if needed (UTF-8 safe)
///
/// The result is at most `max_chars` characters long, including the `...`.
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    if char_len(s) <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        truncate_str(s, max_chars).to_string()
    } else {
        format!("{}...", truncate_str(s, max_chars - 3))
    }
}
