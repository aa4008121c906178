//! Request options and response types for the HTTP capability.

use std::collections::BTreeMap;
use std::time::Duration;

/// Response headers with lowercase names.
///
/// A `BTreeMap` keeps serialized reports deterministic.
pub type Headers = BTreeMap<String, String>;

/// HTTP methods used by the audit stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
        }
    }
}

/// Per-request options.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Request method
    pub method: Method,
    /// Per-request timeout; the client default applies when `None`
    pub timeout: Option<Duration>,
    /// Follow 3xx responses to their final destination
    pub follow_redirects: bool,
    /// Read the response body into [`FetchResponse::body`]
    pub read_body: bool,
}

impl FetchOptions {
    /// A redirect-following GET that reads the body.
    pub fn get() -> Self {
        Self {
            method: Method::Get,
            timeout: None,
            follow_redirects: true,
            read_body: true,
        }
    }

    /// A redirect-following HEAD request.
    pub fn head() -> Self {
        Self {
            method: Method::Head,
            timeout: None,
            follow_redirects: true,
            read_body: false,
        }
    }

    /// Overrides the client's default timeout for this request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Skips reading the body (status and headers only).
    pub fn without_body(mut self) -> Self {
        self.read_body = false;
        self
    }
}

/// A received HTTP response.
#[derive(Debug, Clone, Default)]
pub struct FetchResponse {
    /// URL of the final response (after redirects, when followed)
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Response headers, lowercase names
    pub headers: Headers,
    /// Response body (empty unless requested), truncated to the body size limit
    pub body: String,
}

impl FetchResponse {
    /// `true` for 2xx statuses.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Response body as text.
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Header value by (case-insensitive) name, empty string when absent.
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
            .unwrap_or("")
    }
}
