//! Small value formatters for the HTML report.

use std::path::Path;

use html_escape::{encode_double_quoted_attribute, encode_text};

/// HTML-escapes text content.
pub(crate) fn esc(value: &str) -> String {
    encode_text(value).into_owned()
}

/// HTML-escapes a double-quoted attribute value.
pub(crate) fn attr(value: &str) -> String {
    encode_double_quoted_attribute(value).into_owned()
}

/// `1234` -> `"1.2 KB"`; binary units up to GB.
pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

pub(crate) fn format_ms(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |ms| format!("{ms} ms"))
}

/// Escaped value, or `-` when empty.
pub(crate) fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        esc(value)
    }
}

pub(crate) fn score_or_dash(score: Option<u8>) -> String {
    score.map_or_else(|| "-".to_string(), |s| s.to_string())
}

/// File name component of a path, used for images next to the report.
pub(crate) fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `status-ok` when `good`, `status-bad` otherwise.
pub(crate) fn status_class(good: bool) -> &'static str {
    if good {
        "status-ok"
    } else {
        "status-bad"
    }
}
