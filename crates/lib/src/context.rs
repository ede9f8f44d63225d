//! # Context Preparation
//!
//! Extracted document text can be far larger than the completion model's
//! input window, so it is cut down to a fixed character budget before being
//! embedded in a prompt.

use std::borrow::Cow;

/// The marker appended when the context had to be cut.
pub const TRUNCATION_MARKER: &str = "...";

/// The default character budget for document context.
pub const DEFAULT_MAX_CONTEXT_CHARS: usize = 10_000;

/// Truncates `text` to at most `max_chars` characters.
///
/// Counts Unicode scalar values, not bytes. Input at or under the budget is
/// returned borrowed and unchanged; longer input becomes exactly the first
/// `max_chars` characters followed by [`TRUNCATION_MARKER`]. The cut is a
/// hard one: no attempt is made to land on a token or sentence boundary.
pub fn truncate(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let mut cut = String::with_capacity(byte_idx + TRUNCATION_MARKER.len());
            cut.push_str(&text[..byte_idx]);
            cut.push_str(TRUNCATION_MARKER);
            Cow::Owned(cut)
        }
        None => Cow::Borrowed(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        let text = "short context";
        let result = truncate(text, 10_000);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, text);
    }

    #[test]
    fn text_exactly_at_budget_is_untouched() {
        let text = "a".repeat(100);
        let result = truncate(&text, 100);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, text);
    }

    #[test]
    fn long_text_is_cut_with_marker() {
        let text = "x".repeat(150);
        let result = truncate(&text, 100);
        assert_eq!(result.len(), 103);
        assert_eq!(&result[..100], "x".repeat(100));
        assert!(result.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn budget_counts_characters_not_bytes() {
        // Four 3-byte characters; a byte-based cut at 2 would panic or split
        // a code point.
        let text = "ありがとう";
        let result = truncate(text, 2);
        assert_eq!(result, "あり...");
    }

    #[test]
    fn truncating_short_text_is_idempotent() {
        let text = "unchanged";
        assert_eq!(truncate(&truncate(text, 50), 50), text);
    }
}
