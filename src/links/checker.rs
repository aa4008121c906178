//! Bounded link reachability sampling.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use url::Url;

use super::extract::{extract_links, is_click_here};
use super::types::{LinkCheckResult, LinkRecord, LinkSignals};
use crate::config::{
    LINK_CHECK_CONCURRENCY, LINK_CHECK_TIMEOUT, MAX_BROKEN_SAMPLES, MAX_EXTERNAL_LINK_CHECKS,
    MAX_INTERNAL_LINK_CHECKS, MAX_LINK_SAMPLES,
};
use crate::error_handling::StageError;
use crate::http::{FetchOptions, HttpClient};

/// Outcome of checking one link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkStatus {
    /// A 2xx status was received
    pub ok: bool,
    /// Last status received, 0 when both requests failed
    pub status: u16,
}

/// Extracts links from rendered HTML and checks a bounded sample.
pub struct LinkChecker {
    client: Arc<dyn HttpClient>,
    timeout: Duration,
}

impl LinkChecker {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            client,
            timeout: LINK_CHECK_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout (HEAD and GET each).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Analyzes the links of `html` rendered at `final_url`.
    ///
    /// Never fails: an unparsable `final_url` yields default counts with `error` set.
    pub async fn analyze(&self, html: &str, final_url: &str) -> LinkSignals {
        match self.try_analyze(html, final_url).await {
            Ok(signals) => signals,
            Err(e) => LinkSignals {
                error: Some(crate::utils::sanitize_error_message(&e.to_string())),
                ..Default::default()
            },
        }
    }

    async fn try_analyze(&self, html: &str, final_url: &str) -> Result<LinkSignals, StageError> {
        let base = Url::parse(final_url).map_err(|source| StageError::InvalidUrl {
            url: final_url.to_string(),
            source,
        })?;
        let links = extract_links(html, &base);
        let (internal, external): (Vec<&LinkRecord>, Vec<&LinkRecord>) =
            links.iter().partition(|l| !l.external);

        let to_check = select_for_checking(&internal, &external);
        log::debug!(
            "Checking {} of {} links ({} internal, {} external)",
            to_check.len(),
            links.len(),
            internal.len(),
            external.len()
        );

        let checks: Vec<_> = to_check
            .into_iter()
            .map(|link| async move { (link, self.check_link(&link.href).await) })
            .collect();
        let checked: Vec<(&LinkRecord, LinkStatus)> = stream::iter(checks)
            .buffered(LINK_CHECK_CONCURRENCY)
            .collect()
            .await;

        let broken: Vec<LinkCheckResult> = checked
            .into_iter()
            .filter(|(_, status)| !status.ok)
            .map(|(link, status)| LinkCheckResult {
                href: link.href.clone(),
                anchor_text: link.anchor_text.clone(),
                http_status: status.status,
                link_class: link.class(),
            })
            .collect();

        let signals = LinkSignals {
            total: links.len(),
            internal: internal.len(),
            external: external.len(),
            external_follow: external.iter().filter(|l| !l.nofollow).count(),
            external_nofollow: external.iter().filter(|l| l.nofollow).count(),
            external_noopener: external.iter().filter(|l| l.noopener).count(),
            external_ugc: external.iter().filter(|l| l.ugc).count(),
            external_sponsored: external.iter().filter(|l| l.sponsored).count(),
            empty_anchors: links.iter().filter(|l| l.anchor_text.is_empty()).count(),
            click_here_anchors: links.iter().filter(|l| is_click_here(&l.anchor_text)).count(),
            top_internal_samples: internal.iter().take(MAX_LINK_SAMPLES).map(|l| (*l).clone()).collect(),
            top_external_samples: external.iter().take(MAX_LINK_SAMPLES).map(|l| (*l).clone()).collect(),
            broken_total: broken.len(),
            broken_samples: broken.into_iter().take(MAX_BROKEN_SAMPLES).collect(),
            error: None,
        };

        log::info!(
            "Links: {} total ({} internal, {} external), {} broken",
            signals.total,
            signals.internal,
            signals.external,
            signals.broken_total
        );
        Ok(signals)
    }

    /// HEAD, falling back once to GET when HEAD gets no response.
    ///
    /// A HEAD that answers with any status is final.
    pub async fn check_link(&self, href: &str) -> LinkStatus {
        let head = FetchOptions::head().with_timeout(self.timeout);
        let head_error = match self.client.fetch(href, &head).await {
            Ok(response) => {
                return LinkStatus {
                    ok: response.ok(),
                    status: response.status,
                }
            }
            Err(e) => e,
        };
        log::debug!("HEAD {} failed ({}), retrying with GET", href, head_error);

        let get = FetchOptions::get().without_body().with_timeout(self.timeout);
        match self.client.fetch(href, &get).await {
            Ok(response) => LinkStatus {
                ok: response.ok(),
                status: response.status,
            },
            Err(e) => {
                log::debug!("GET {} failed: {}", href, e);
                LinkStatus { ok: false, status: 0 }
            }
        }
    }
}

/// First internal and first external links, deduplicated by href, first occurrence kept.
fn select_for_checking<'a>(internal: &[&'a LinkRecord], external: &[&'a LinkRecord]) -> Vec<&'a LinkRecord> {
    let mut seen = HashSet::new();
    internal
        .iter()
        .take(MAX_INTERNAL_LINK_CHECKS)
        .chain(external.iter().take(MAX_EXTERNAL_LINK_CHECKS))
        .filter(|link| seen.insert(link.href.as_str()))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::initialization::init_http_client;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    fn checker() -> LinkChecker {
        let client = init_http_client(&Config::default()).expect("client");
        LinkChecker::new(client).with_timeout(Duration::from_millis(500))
    }

    fn record(href: &str, external: bool) -> LinkRecord {
        LinkRecord {
            href: href.to_string(),
            anchor_text: String::new(),
            external,
            nofollow: false,
            ugc: false,
            sponsored: false,
            noopener: false,
        }
    }

    #[test]
    fn test_select_for_checking_caps_and_dedupes() {
        let internal: Vec<LinkRecord> = (0..40)
            .map(|i| record(&format!("https://example.com/{}", i % 20), false))
            .collect();
        let external: Vec<LinkRecord> = (0..40)
            .map(|i| record(&format!("https://ext{i}.org/"), true))
            .collect();
        let internal_refs: Vec<&LinkRecord> = internal.iter().collect();
        let external_refs: Vec<&LinkRecord> = external.iter().collect();

        let selected = select_for_checking(&internal_refs, &external_refs);
        assert_eq!(selected.len(), 30);
        assert_eq!(selected[0].href, "https://example.com/0");
        assert_eq!(selected[15].href, "https://ext0.org/");

        let dup_internal = vec![record("https://example.com/", false); 5];
        let dup_refs: Vec<&LinkRecord> = dup_internal.iter().collect();
        assert_eq!(select_for_checking(&dup_refs, &[]).len(), 1);
    }

    #[tokio::test]
    async fn test_check_link_head_success() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("HEAD", "/ok")).respond_with(status_code(200)),
        );
        let status = checker().check_link(&server.url("/ok").to_string()).await;
        assert_eq!(status, LinkStatus { ok: true, status: 200 });
    }

    #[tokio::test]
    async fn test_check_link_head_error_status_is_final() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("HEAD", "/gone"))
                .times(1)
                .respond_with(status_code(404)),
        );
        let status = checker().check_link(&server.url("/gone").to_string()).await;
        assert_eq!(status, LinkStatus { ok: false, status: 404 });
    }

    #[tokio::test]
    async fn test_check_link_falls_back_to_get_on_timeout() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("HEAD", "/slow-head")).respond_with(
                delay_and_then(Duration::from_secs(2), status_code(200)),
            ),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/slow-head"))
                .respond_with(status_code(200).body("ok")),
        );
        let status = checker().check_link(&server.url("/slow-head").to_string()).await;
        assert_eq!(status, LinkStatus { ok: true, status: 200 });
    }

    #[tokio::test]
    async fn test_check_link_unreachable_is_status_zero() {
        let status = checker().check_link("http://127.0.0.1:9/nothing").await;
        assert_eq!(status, LinkStatus { ok: false, status: 0 });
    }

    #[tokio::test]
    async fn test_analyze_counts_and_broken_samples() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("HEAD", "/fine"))
                .times(1)
                .respond_with(status_code(200)),
        );
        server.expect(
            Expectation::matching(request::method_path("HEAD", "/missing"))
                .times(1)
                .respond_with(status_code(404)),
        );
        let page = server.url("/").to_string();
        let html = r#"<body>
            <a href="/fine">Fine</a>
            <a href="/fine">Fine again</a>
            <a href="/missing">click here</a>
            <a href="http://localhost:9/" rel="nofollow noopener"></a>
        </body>"#;

        let signals = checker().analyze(html, &page).await;
        assert_eq!(signals.total, 4);
        assert_eq!(signals.internal, 3);
        assert_eq!(signals.external, 1);
        assert_eq!(signals.external_nofollow, 1);
        assert_eq!(signals.external_follow, 0);
        assert_eq!(signals.external_noopener, 1);
        assert_eq!(signals.empty_anchors, 1);
        assert_eq!(signals.click_here_anchors, 1);
        assert_eq!(signals.top_internal_samples.len(), 3);
        assert_eq!(signals.broken_total, 2);
        assert_eq!(signals.broken_samples[0].http_status, 404);
        assert_eq!(signals.broken_samples[0].anchor_text, "click here");
        assert_eq!(signals.broken_samples[1].http_status, 0);
        assert_eq!(signals.broken_samples[1].link_class, crate::links::LinkClass::External);
        assert!(signals.error.is_none());
    }

    #[tokio::test]
    async fn test_analyze_invalid_final_url_degrades() {
        let signals = checker().analyze("<a href=\"/x\">x</a>", "not a url").await;
        assert_eq!(signals.total, 0);
        assert!(signals.error.expect("error").contains("not a url"));
    }
}
