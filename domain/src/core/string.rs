//! String helpers for status lines.

/// Single-line preview of a text: whitespace runs collapse to one space and
/// anything past `max_chars` characters becomes `...`.
pub fn preview(s: &str, max_chars: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    match collapsed.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &collapsed[..cut]),
        None => collapsed,
    }
}
