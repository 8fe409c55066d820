//! Item name sanitization
//!
//! Every user-entered name is reduced to a canonical id before any lookup,
//! write or delete. The id is both the record filename and the display name.

/// Id used when a name has no usable characters
pub const UNTITLED: &str = "untitled";

const REPLACEMENT: char = '-';

/// Reduce a raw item name to its canonical, filesystem-safe id
///
/// Surrounding whitespace is trimmed. ASCII letters, digits, space, `-`, `_`,
/// `.` and `,` are kept; every other character becomes `-`. A leading `.` is
/// also replaced so the record is never hidden and never `.` or `..`.
/// Empty input maps to [`UNTITLED`].
pub fn sanitize_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return UNTITLED.to_string();
    }

    let mut id: String = trimmed
        .chars()
        .map(|c| if is_allowed(c) { c } else { REPLACEMENT })
        .collect();

    if id.starts_with('.') {
        id.replace_range(..1, "-");
    }

    if id.is_empty() {
        UNTITLED.to_string()
    } else {
        id
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.' | ',')
}
