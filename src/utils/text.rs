//! Text helpers.

/// Maximum length of an error message carried inside a report.
const MAX_ERROR_MESSAGE_LENGTH: usize = 500;

/// Collapses every run of whitespace into a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncates to at most `max_chars` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

/// Removes control characters from an error message and caps its length.
///
/// Stage errors end up in the HTML report and the JSON export; tabs and
/// newlines are kept, other control characters (0x00-0x1F, 0x7F) are dropped.
pub fn sanitize_error_message(message: &str) -> String {
    let sanitized: String = message
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect();

    let char_count = sanitized.chars().count();
    if char_count > MAX_ERROR_MESSAGE_LENGTH {
        format!(
            "{}... (truncated, original length: {} chars)",
            truncate_chars(&sanitized, MAX_ERROR_MESSAGE_LENGTH - 50),
            char_count
        )
    } else {
        sanitized
    }
}
