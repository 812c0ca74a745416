//! Bounded content excerpts for search results.

/// Target snippet length in bytes.
const SNIPPET_LENGTH: usize = 200;

/// Generate a snippet of `content` for a query.
///
/// Short content is returned whole. Otherwise a window of roughly
/// [`SNIPPET_LENGTH`] is centered on the earliest occurrence of any query
/// token (case-insensitive), trimmed at both ends to a space boundary, with
/// `...` marking a window that does not touch the start or end of the
/// content. When no token occurs verbatim, the first [`SNIPPET_LENGTH`]
/// bytes trimmed to the last space are used instead.
pub fn generate(content: &str, query_tokens: &[String]) -> String {
    if content.len() <= SNIPPET_LENGTH {
        return content.to_string();
    }

    let lower = content.to_lowercase();
    let first_hit = query_tokens
        .iter()
        .filter_map(|token| lower.find(token.as_str()))
        .min();

    match first_hit {
        Some(pos) => window_around(content, pos.min(content.len())),
        None => leading_window(content),
    }
}

/// Excerpt a window centered on `pos`, clamped to content bounds.
fn window_around(content: &str, pos: usize) -> String {
    let pos = floor_char_boundary(content, pos);
    let mut start = floor_char_boundary(content, pos.saturating_sub(SNIPPET_LENGTH / 2));
    let end = ceil_char_boundary(content, (start + SNIPPET_LENGTH).min(content.len()));
    if end - start < SNIPPET_LENGTH {
        start = floor_char_boundary(content, end.saturating_sub(SNIPPET_LENGTH));
    }

    let mut window = &content[start..end];
    if start > 0
        && let Some(space) = window.find(' ')
    {
        window = &window[space + 1..];
    }
    if end < content.len()
        && let Some(space) = window.rfind(' ')
    {
        window = &window[..space];
    }

    let mut snippet = String::with_capacity(window.len() + 6);
    if start > 0 {
        snippet.push_str("...");
    }
    snippet.push_str(window.trim());
    if end < content.len() {
        snippet.push_str("...");
    }
    snippet
}

/// Fallback when no query token occurs verbatim: the leading bytes trimmed
/// to the last space boundary.
fn leading_window(content: &str) -> String {
    let end = ceil_char_boundary(content, SNIPPET_LENGTH.min(content.len()));
    let head = &content[..end];
    let head = head.rfind(' ').map_or(head, |space| &head[..space]);
    format!("{}...", head.trim_end())
}

fn floor_char_boundary(s: &str, mut i: usize) -> usize {
    i = i.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

fn ceil_char_boundary(s: &str, mut i: usize) -> usize {
    i = i.min(s.len());
    while !s.is_char_boundary(i) {
        i += 1;
    }
    i
}
