//! Error categorization.
//!
//! Maps transport errors onto the coarse [`HttpErrorKind`] categories used in
//! log lines and stage error strings.

use super::types::HttpErrorKind;

/// Categorizes a `reqwest::Error` into an `HttpErrorKind`.
///
/// Status errors are not categorized here: the `HttpClient` never calls
/// `error_for_status`, so non-2xx responses are data, not errors.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> HttpErrorKind {
    if error.is_builder() {
        HttpErrorKind::Builder
    } else if error.is_redirect() {
        HttpErrorKind::Redirect
    } else if error.is_timeout() {
        HttpErrorKind::Timeout
    } else if error.is_connect() {
        HttpErrorKind::Connect
    } else if error.is_request() {
        HttpErrorKind::Request
    } else if error.is_body() {
        HttpErrorKind::Body
    } else if error.is_decode() {
        HttpErrorKind::Decode
    } else {
        HttpErrorKind::Other
    }
}
