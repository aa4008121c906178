//! Shared helpers.
//!
//! This module provides:
//! - CSS selector and regex construction for compile-time constant patterns
//! - Text helpers (whitespace collapsing, char-safe truncation, error-message sanitizing)
//! - Target URL validation and small URL accessors

mod selector;
mod text;
mod target;

pub use selector::{compile_regex_unsafe, element_text, parse_selector_unsafe, trimmed_attr};
pub use text::{collapse_whitespace, sanitize_error_message, truncate_chars};
pub use target::{host_of, origin_of, path_of, validate_and_normalize_url, MAX_URL_LENGTH};
