//! Audit-target validation and URL accessors.

use url::Url;

use crate::error_handling::AuditError;

/// Maximum accepted URL length, matching common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

/// Validates and normalizes an audit target.
///
/// Adds an `https://` prefix when no scheme is given, then requires the result
/// to be an absolute `http`/`https` URL with a host. The returned string is the
/// parser's serialization (so `https://example.com` becomes `https://example.com/`).
///
/// # Errors
///
/// Returns `AuditError::InvalidTarget` for empty, over-long, unparsable or
/// non-http(s) input.
pub fn validate_and_normalize_url(input: &str) -> Result<Url, AuditError> {
    let input = input.trim();
    let reject = |reason: &str| AuditError::InvalidTarget {
        url: input.chars().take(100).collect(),
        reason: reason.to_string(),
    };

    if input.is_empty() {
        return Err(reject("URL is empty"));
    }
    if input.len() > MAX_URL_LENGTH {
        return Err(reject(&format!(
            "URL exceeds maximum length ({} > {})",
            input.len(),
            MAX_URL_LENGTH
        )));
    }

    let normalized = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{input}")
    };

    let parsed = Url::parse(&normalized).map_err(|e| reject(&e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(reject(&format!("unsupported scheme '{other}'"))),
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(reject("URL has no host"));
    }
    Ok(parsed)
}

/// Hostname of an absolute URL, or `None` when it does not parse.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url).ok()?.host_str().map(str::to_string)
}

/// `scheme://host[:port]` of an absolute URL.
pub fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}

/// Path of a URL, always starting with `/`.
pub fn path_of(url: &Url) -> String {
    let path = url.path();
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
