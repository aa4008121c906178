//! HTTP request building and header normalization.

use super::types::Headers;

/// Realistic browser request headers.
///
/// Some sites answer plain library requests with 403 or a stripped page; these
/// headers mimic a modern Chrome navigation so robots.txt, link checks and the
/// technology fetch see what a visitor sees. `Accept-Encoding` is left to reqwest
/// so that response decompression stays automatic.
pub struct RequestHeaders;

impl RequestHeaders {
    /// Applies the standard request headers to a `reqwest::RequestBuilder`.
    pub fn apply_to_request_builder(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(
                reqwest::header::HeaderName::from_static("sec-fetch-dest"),
                "document",
            )
            .header(
                reqwest::header::HeaderName::from_static("sec-fetch-mode"),
                "navigate",
            )
            .header(
                reqwest::header::HeaderName::from_static("sec-fetch-site"),
                "none",
            )
            .header(reqwest::header::UPGRADE_INSECURE_REQUESTS, "1")
    }
}

/// Converts a reqwest header map into lowercase-keyed [`Headers`].
///
/// Repeated headers are joined with `", "`. Values that are not valid visible
/// ASCII are decoded lossily rather than dropped.
pub fn lowercase_headers(headers: &reqwest::header::HeaderMap) -> Headers {
    let mut out = Headers::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes()).to_string();
        out.entry(name.as_str().to_ascii_lowercase())
            .and_modify(|existing: &mut String| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    out
}
