//! HTTP client initialization.
//!
//! Builds the reqwest clients behind [`ReqwestHttpClient`]: one that follows
//! redirects and one that does not, sharing user agent and timeout settings.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, MAX_REDIRECT_HOPS};
use crate::error_handling::InitializationError;
use crate::http::ReqwestHttpClient;

/// Initializes the HTTP client used by the link, site and technology stages.
///
/// Creates two `reqwest::Client`s configured with:
/// - User-Agent header from config
/// - Default timeout from config (individual requests may override it)
/// - Redirect following up to `MAX_REDIRECT_HOPS` (first client) or disabled (second)
/// - Rustls TLS backend (no native TLS)
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_http_client(config: &Config) -> Result<Arc<ReqwestHttpClient>, InitializationError> {
    let timeout = Duration::from_secs(config.http_timeout_seconds);

    let following = ClientBuilder::new()
        .timeout(timeout)
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .build()?;

    let non_following = ClientBuilder::new()
        .timeout(timeout)
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(Arc::new(ReqwestHttpClient::new(following, non_following)))
}
