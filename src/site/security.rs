//! Security-relevant response headers.

use serde::Serialize;

use crate::config::{
    HEADER_CONTENT_SECURITY_POLICY, HEADER_FEATURE_POLICY, HEADER_PERMISSIONS_POLICY,
    HEADER_REFERRER_POLICY, HEADER_STRICT_TRANSPORT_SECURITY, HEADER_X_CONTENT_TYPE_OPTIONS,
    HEADER_X_FRAME_OPTIONS,
};
use crate::http::Headers;

/// The six security headers, copied verbatim (empty when absent).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SecurityHeaders {
    pub content_security_policy: String,
    pub strict_transport_security: String,
    pub x_content_type_options: String,
    pub x_frame_options: String,
    pub referrer_policy: String,
    /// `Permissions-Policy`, or the legacy `Feature-Policy` when absent
    pub permissions_policy: String,
}

impl SecurityHeaders {
    /// Reads the headers from a lowercase-keyed header map.
    pub fn from_headers(headers: &Headers) -> Self {
        let get = |name: &str| headers.get(name).cloned().unwrap_or_default();
        let permissions_policy = match get(HEADER_PERMISSIONS_POLICY) {
            value if value.is_empty() => get(HEADER_FEATURE_POLICY),
            value => value,
        };
        Self {
            content_security_policy: get(HEADER_CONTENT_SECURITY_POLICY),
            strict_transport_security: get(HEADER_STRICT_TRANSPORT_SECURITY),
            x_content_type_options: get(HEADER_X_CONTENT_TYPE_OPTIONS),
            x_frame_options: get(HEADER_X_FRAME_OPTIONS),
            referrer_policy: get(HEADER_REFERRER_POLICY),
            permissions_policy,
        }
    }

    /// Warnings for a page served from `final_url` with these headers.
    pub fn warnings(&self, final_url: &str) -> Vec<SecurityWarning> {
        let mut warnings = Vec::new();
        if !final_url.starts_with("https://") {
            warnings.push(SecurityWarning::NoHttps);
        }
        if self.strict_transport_security.is_empty() {
            warnings.push(SecurityWarning::MissingHsts);
        }
        if self.content_security_policy.is_empty() {
            warnings.push(SecurityWarning::MissingCsp);
        }
        if self.x_content_type_options.is_empty() {
            warnings.push(SecurityWarning::MissingContentTypeOptions);
        }
        if self.x_frame_options.is_empty() {
            warnings.push(SecurityWarning::MissingFrameOptions);
        }
        warnings
    }
}

/// Security findings shown in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityWarning {
    /// Page served over plain HTTP
    NoHttps,
    /// Missing Strict-Transport-Security (HSTS) header
    MissingHsts,
    /// Missing Content-Security-Policy header
    MissingCsp,
    /// Missing X-Content-Type-Options header
    MissingContentTypeOptions,
    /// Missing X-Frame-Options header
    MissingFrameOptions,
}

impl SecurityWarning {
    /// Every check, in report order.
    pub const ALL: [SecurityWarning; 5] = [
        SecurityWarning::NoHttps,
        SecurityWarning::MissingHsts,
        SecurityWarning::MissingCsp,
        SecurityWarning::MissingContentTypeOptions,
        SecurityWarning::MissingFrameOptions,
    ];

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            SecurityWarning::NoHttps => "Page is served over HTTP instead of HTTPS",
            SecurityWarning::MissingHsts => "Missing Strict-Transport-Security (HSTS) header",
            SecurityWarning::MissingCsp => "Missing Content-Security-Policy header",
            SecurityWarning::MissingContentTypeOptions => "Missing X-Content-Type-Options header",
            SecurityWarning::MissingFrameOptions => "Missing X-Frame-Options header",
        }
    }

    /// Short label for badges.
    pub fn label(&self) -> &'static str {
        match self {
            SecurityWarning::NoHttps => "HTTPS",
            SecurityWarning::MissingHsts => "HSTS",
            SecurityWarning::MissingCsp => "CSP",
            SecurityWarning::MissingContentTypeOptions => "nosniff",
            SecurityWarning::MissingFrameOptions => "Framing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> Headers {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_from_headers_copies_verbatim() {
        let h = headers(&[
            ("content-security-policy", "default-src 'self'"),
            ("strict-transport-security", "max-age=31536000; includeSubDomains"),
            ("x-content-type-options", "nosniff"),
            ("x-frame-options", "SAMEORIGIN"),
            ("referrer-policy", "no-referrer"),
            ("permissions-policy", "camera=()"),
        ]);
        let security = SecurityHeaders::from_headers(&h);
        assert_eq!(security.content_security_policy, "default-src 'self'");
        assert_eq!(security.strict_transport_security, "max-age=31536000; includeSubDomains");
        assert_eq!(security.x_frame_options, "SAMEORIGIN");
        assert_eq!(security.permissions_policy, "camera=()");
        assert!(security.warnings("https://example.com/").is_empty());
    }

    #[test]
    fn test_missing_headers_are_empty() {
        let security = SecurityHeaders::from_headers(&Headers::new());
        assert_eq!(security, SecurityHeaders::default());
        assert_eq!(security.warnings("http://example.com/").len(), 5);
    }

    #[test]
    fn test_feature_policy_fallback() {
        let h = headers(&[("feature-policy", "geolocation 'none'")]);
        assert_eq!(
            SecurityHeaders::from_headers(&h).permissions_policy,
            "geolocation 'none'"
        );
    }
}
