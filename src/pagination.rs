//! Response pagination.
//!
//! Telegram rejects messages longer than 4096 characters. Long replies are
//! split into fixed-width chunks before markup conversion; the limit leaves
//! headroom for the tags the HTML conversion adds.

/// Chunk size for outbound replies, below Telegram's 4096 hard cap.
pub const PAGE_LIMIT: usize = 4050;

/// Split `text` into contiguous chunks of at most `limit` bytes, never
/// splitting inside a UTF-8 character. Concatenating the result reproduces
/// `text` byte-for-byte.
///
/// The slicing is fixed-width: it makes no attempt to avoid breaking words,
/// code fences, or markup tokens. A `limit` smaller than one multi-byte
/// character cannot be honored; the chunk then carries that character whole.
pub fn paginate(text: &str, limit: usize) -> Vec<String> {
    if text.len() <= limit {
        return vec![text.to_string()];
    }

    let mut pages = Vec::with_capacity(text.len() / limit.max(1) + 1);
    let mut rest = text;
    while rest.len() > limit {
        let mut cut = limit;
        while cut > 0 && !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        if cut == 0 {
            cut = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }
        let (page, tail) = rest.split_at(cut);
        pages.push(page.to_string());
        rest = tail;
    }
    pages.push(rest.to_string());
    pages
}
