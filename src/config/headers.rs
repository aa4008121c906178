//! HTTP header name constants.
//!
//! Header names are lowercase because response headers are normalized to
//! lowercase keys everywhere in the audit data model.

// Security header names
/// Content Security Policy header
pub const HEADER_CONTENT_SECURITY_POLICY: &str = "content-security-policy";
/// HTTP Strict Transport Security header
pub const HEADER_STRICT_TRANSPORT_SECURITY: &str = "strict-transport-security";
/// X-Content-Type-Options header
pub const HEADER_X_CONTENT_TYPE_OPTIONS: &str = "x-content-type-options";
/// X-Frame-Options header
pub const HEADER_X_FRAME_OPTIONS: &str = "x-frame-options";
/// Referrer-Policy header
pub const HEADER_REFERRER_POLICY: &str = "referrer-policy";
/// Permissions-Policy header
pub const HEADER_PERMISSIONS_POLICY: &str = "permissions-policy";
/// Legacy name of Permissions-Policy, used as a fallback
pub const HEADER_FEATURE_POLICY: &str = "feature-policy";

// Crawl directives
/// X-Robots-Tag header
pub const HEADER_X_ROBOTS_TAG: &str = "x-robots-tag";

// Infrastructure/Server identification
/// Server header (identifies server software)
pub const HEADER_SERVER: &str = "server";
/// X-Powered-By header (identifies server framework)
pub const HEADER_X_POWERED_BY: &str = "x-powered-by";

// Caching and size
/// Cache-Control header
pub const HEADER_CACHE_CONTROL: &str = "cache-control";
/// Content-Length header
pub const HEADER_CONTENT_LENGTH: &str = "content-length";
