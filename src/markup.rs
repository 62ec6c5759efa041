//! Markdown to Telegram HTML conversion.
//!
//! Handles the constrained subset the completion API actually produces:
//! fenced code blocks, inline code, and bold. Pagination can cut a reply in
//! the middle of a fence, so a lone fence marker is balanced heuristically
//! instead of being rejected. Markers that still fail to pair after that are
//! left visible; Telegram renders them as plain text.

const FENCE: &str = "```";

/// Convert a page of reply text into Telegram-safe HTML.
///
/// Steps, in order: escape `&`/`<`/`>`, convert well-formed fence pairs to
/// `<pre>` blocks, balance a truncated fence by position, convert `**` pairs
/// to `<b>`, convert remaining single-backtick pairs to `<code>`.
pub fn convert(text: &str) -> String {
    let escaped = escape(text);
    let fenced = balance_fence(&convert_fences(&escaped));
    let bold = convert_pairs(&fenced, "**", "<b>", "</b>");
    convert_pairs(&bold, "`", "<code>", "</code>")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Replace well-formed ``` pairs with `<pre>` blocks, left to right. A lone
/// trailing marker is kept for [`balance_fence`].
fn convert_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(FENCE) {
        let (before, marked) = rest.split_at(start);
        out.push_str(before);
        let (_, after_open) = marked.split_at(FENCE.len());
        if let Some(end) = after_open.find(FENCE) {
            let (content, marked_close) = after_open.split_at(end);
            out.push_str("<pre>");
            out.push_str(content);
            out.push_str("</pre>");
            let (_, tail) = marked_close.split_at(FENCE.len());
            rest = tail;
        } else {
            out.push_str(FENCE);
            rest = after_open;
            break;
        }
    }
    out.push_str(rest);
    out
}

/// Balance the one fence marker pagination may have truncated.
///
/// A marker past the text's midpoint most likely opens a block whose closing
/// marker fell onto the next page; a marker before it most likely closes a
/// block opened on the previous page. Best effort only: the rendering of the
/// neighboring page is out of this function's hands.
fn balance_fence(text: &str) -> String {
    let Some(pos) = text.find(FENCE) else {
        return text.to_string();
    };
    let (before, marked) = text.split_at(pos);
    let (_, after) = marked.split_at(FENCE.len());
    let mut out = String::with_capacity(text.len() + "<pre></pre>".len());
    if pos > text.len() / 2 {
        out.push_str(before);
        out.push_str("<pre>");
        out.push_str(after);
        out.push_str("</pre>");
    } else {
        out.push_str("<pre>");
        out.push_str(before);
        out.push_str("</pre>");
        out.push_str(after);
    }
    out
}

/// Replace `marker` pairs with the given tags, left to right. A marker with
/// no partner stays visible.
fn convert_pairs(text: &str, marker: &str, open_tag: &str, close_tag: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(marker) {
        let (before, marked) = rest.split_at(start);
        out.push_str(before);
        let (_, after_open) = marked.split_at(marker.len());
        if let Some(end) = after_open.find(marker) {
            let (content, marked_close) = after_open.split_at(end);
            out.push_str(open_tag);
            out.push_str(content);
            out.push_str(close_tag);
            let (_, tail) = marked_close.split_at(marker.len());
            rest = tail;
        } else {
            out.push_str(marker);
            rest = after_open;
            break;
        }
    }
    out.push_str(rest);
    out
}
