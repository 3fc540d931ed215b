//! Extraction helpers for free-form model replies.
//!
//! Models are asked for JSON or tagged output but frequently wrap it in prose
//! or markdown fences. These helpers locate the structured part without
//! interpreting it.

/// Locate the outermost JSON object in `text`: from the first `{` to the
/// last `}`.
///
/// Returns `None` if there is no such span.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Extract the trimmed content of the first `<tag>...</tag>` block.
pub fn extract_tagged<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = text.find(&open)? + open.len();
    let end = text[start..].find(&close)? + start;
    Some(text[start..end].trim())
}

/// Remove every `<tag>...</tag>` block from `text`.
///
/// An unterminated block is left in place.
pub fn strip_tagged(text: &str, tag: &str) -> String {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(&open) {
        let Some(rel_end) = rest[start..].find(&close) else {
            break;
        };
        out.push_str(&rest[..start]);
        rest = &rest[start + rel_end + close.len()..];
    }
    out.push_str(rest);
    out
}
