//! Splitting long replies into platform-sized messages.
//!
//! Telegram rejects messages above 4096 characters, so every outgoing reply is
//! cut along the most natural boundary available inside each window.

use crate::util::byte_offset;

/// Default chunk size, kept below Telegram's hard limit.
pub const DEFAULT_MAX_CHUNK_LEN: usize = 4000;

/// Cut-point candidates in order of preference, with the number of leading
/// separator bytes that stay on the emitted chunk.
const SEPARATORS: [(&str, usize); 4] = [("\n\n", 0), (". ", 1), ("\n", 0), (" ", 0)];

/// Lazy sequence of chunks over one source string.
///
/// Cloning the iterator restarts from the clone point, so a caller can count
/// the chunks and then walk them again without re-splitting.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    remaining: Option<&'a str>,
    max_len: usize,
}

/// Split `text` into chunks of at most `max_len` characters.
///
/// Text that already fits is yielded untouched (an empty string yields one
/// empty chunk). Longer text is cut at the last paragraph break, sentence end,
/// line break or space inside the window, falling back to a hard cut at
/// `max_len` when the boundary would leave the chunk less than half full.
/// Emitted chunks and the remainder are trimmed at every cut.
#[must_use]
pub fn split_message(text: &str, max_len: usize) -> Chunks<'_> {
    Chunks {
        remaining: Some(text),
        max_len: max_len.max(1),
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let remaining = self.remaining?;
            if remaining.chars().count() <= self.max_len {
                self.remaining = None;
                return Some(remaining);
            }

            let (head, tail) = remaining.split_at(cut_point(remaining, self.max_len));
            let tail = tail.trim();
            self.remaining = (!tail.is_empty()).then_some(tail);

            let head = head.trim();
            if !head.is_empty() {
                return Some(head);
            }
        }
    }
}

/// Byte index at which to cut `text`, which is longer than `max_len` chars.
fn cut_point(text: &str, max_len: usize) -> usize {
    let boundary = SEPARATORS.iter().find_map(|&(sep, keep)| {
        // The separator may start right at the window edge as long as the
        // kept part of it still fits.
        let window = &text[..byte_offset(text, max_len + sep.len() - keep)];
        window.rfind(sep).map(|idx| idx + keep)
    });

    match boundary {
        Some(cut) if text[..cut].chars().count() * 2 >= max_len => cut,
        _ => byte_offset(text, max_len),
    }
}
