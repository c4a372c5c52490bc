//! Small text helpers shared by the log statements of several crates.

/// Return at most `max_chars` characters of `text`, appending `...` when cut.
///
/// Used for prompt and reply previews in logs; never splits a character.
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Byte offset of the `n`-th character of `text`, or `text.len()` when shorter.
#[must_use]
pub fn byte_offset(text: &str, n: usize) -> usize {
    text.char_indices().nth(n).map_or(text.len(), |(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_keeps_short_text() {
        assert_eq!(preview("hello", 10), "hello");
        assert_eq!(preview("hello", 5), "hello");
    }

    #[test]
    fn preview_cuts_on_char_boundary() {
        assert_eq!(preview("héllo wörld", 4), "héll...");
        assert_eq!(preview("📄📄📄", 1), "📄...");
    }

    #[test]
    fn byte_offset_handles_multibyte() {
        assert_eq!(byte_offset("aé b", 2), 3);
        assert_eq!(byte_offset("ab", 10), 2);
    }
}
