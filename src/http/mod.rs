//! Outbound HTTP capability.
//!
//! The link, site and technology stages talk to the network only through the
//! [`HttpClient`] trait: `fetch(url, {method, timeout, follow_redirects})`.
//! [`ReqwestHttpClient`] is the production implementation.

mod request;
mod reqwest_client;
mod types;

use async_trait::async_trait;

use crate::error_handling::HttpError;

pub use request::{lowercase_headers, RequestHeaders};
pub use reqwest_client::ReqwestHttpClient;
pub use types::{FetchOptions, FetchResponse, Headers, Method};

/// Outbound HTTP fetch with optional redirect following and per-request timeout.
///
/// Non-2xx responses are returned as `Ok`; only transport failures (DNS,
/// connect, TLS, timeout, body read) are errors.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Performs a single request.
    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<FetchResponse, HttpError>;
}
