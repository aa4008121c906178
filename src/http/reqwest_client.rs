//! reqwest-backed [`HttpClient`].

use async_trait::async_trait;

use super::request::{lowercase_headers, RequestHeaders};
use super::types::{FetchOptions, FetchResponse, Method};
use super::HttpClient;
use crate::config::MAX_RESPONSE_BODY_SIZE;
use crate::error_handling::HttpError;

/// Production HTTP client.
///
/// Holds two reqwest clients because the redirect policy is fixed per client:
/// one follows redirects, the other returns 3xx responses as-is.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    following: reqwest::Client,
    non_following: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Wraps pre-configured clients (see `initialization::init_http_client`).
    pub fn new(following: reqwest::Client, non_following: reqwest::Client) -> Self {
        Self {
            following,
            non_following,
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn fetch(&self, url: &str, options: &FetchOptions) -> Result<FetchResponse, HttpError> {
        let parsed = url::Url::parse(url).map_err(|_| HttpError::InvalidUrl(url.to_string()))?;

        let client = if options.follow_redirects {
            &self.following
        } else {
            &self.non_following
        };

        let mut builder = match options.method {
            Method::Get => client.get(parsed),
            Method::Head => client.head(parsed),
        };
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        log::debug!("{} {}", options.method.as_str(), url);
        let response = RequestHeaders::apply_to_request_builder(builder)
            .send()
            .await
            .map_err(|e| map_send_error(e, options))?;

        let final_url = response.url().to_string();
        let status = response.status().as_u16();
        let headers = lowercase_headers(response.headers());

        let body = if options.read_body && options.method == Method::Get {
            let bytes = response
                .bytes()
                .await
                .map_err(|e| map_send_error(e, options))?;
            let slice = if bytes.len() > MAX_RESPONSE_BODY_SIZE {
                log::debug!(
                    "Truncating {} byte body from {} to {} bytes",
                    bytes.len(),
                    url,
                    MAX_RESPONSE_BODY_SIZE
                );
                &bytes[..MAX_RESPONSE_BODY_SIZE]
            } else {
                &bytes[..]
            };
            String::from_utf8_lossy(slice).into_owned()
        } else {
            String::new()
        };

        Ok(FetchResponse {
            url: final_url,
            status,
            headers,
            body,
        })
    }
}

fn map_send_error(error: reqwest::Error, options: &FetchOptions) -> HttpError {
    match options.timeout {
        Some(timeout) if error.is_timeout() => HttpError::Timeout(timeout),
        _ => HttpError::from(error),
    }
}
