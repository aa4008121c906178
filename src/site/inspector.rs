//! robots.txt and sitemap discovery for the audited origin.

use std::sync::Arc;

use url::Url;

use super::robots::parse_robots;
use super::security::SecurityHeaders;
use super::types::{ProbeHop, RobotsInfo, SiteSignals, SitemapInfo};
use crate::config::HEADER_X_ROBOTS_TAG;
use crate::http::{FetchOptions, Headers, HttpClient};
use crate::utils::{origin_of, path_of, sanitize_error_message};

/// Probes the site around an already-rendered page.
pub struct SiteInspector {
    client: Arc<dyn HttpClient>,
}

impl SiteInspector {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }

    /// Inspects the origin of `final_url`.
    ///
    /// `response_headers` are the rendered page's main-document headers; the
    /// security headers and `X-Robots-Tag` are read from them. Never fails:
    /// fetch problems are reported through `robots.error`.
    pub async fn inspect(&self, final_url: &str, response_headers: &Headers) -> SiteSignals {
        let mut signals = SiteSignals {
            security_headers: SecurityHeaders::from_headers(response_headers),
            ..Default::default()
        };
        signals.robots.x_robots_header = response_headers
            .get(HEADER_X_ROBOTS_TAG)
            .cloned()
            .unwrap_or_default();

        let page = match Url::parse(final_url) {
            Ok(page) => page,
            Err(e) => {
                signals.robots.error = Some(format!("invalid URL {final_url}: {e}"));
                return signals;
            }
        };
        let origin = origin_of(&page);

        let sitemaps = self
            .probe_robots(&origin, &path_of(&page), &mut signals)
            .await;
        if sitemaps.is_empty() {
            self.probe_default_sitemap(&origin, &mut signals).await;
        } else {
            signals.sitemap.urls = sitemaps;
        }

        signals
    }

    /// Fetches and evaluates robots.txt, returning the sitemap URLs it lists.
    async fn probe_robots(
        &self,
        origin: &str,
        target_path: &str,
        signals: &mut SiteSignals,
    ) -> Vec<String> {
        let robots_url = format!("{origin}/robots.txt");
        signals.robots = RobotsInfo {
            url: robots_url.clone(),
            x_robots_header: std::mem::take(&mut signals.robots.x_robots_header),
            ..Default::default()
        };

        let response = match self.client.fetch(&robots_url, &FetchOptions::get()).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("robots.txt fetch failed for {robots_url}: {e}");
                signals.robots.error = Some(sanitize_error_message(&e.to_string()));
                return Vec::new();
            }
        };

        signals.robots.status = Some(response.status);
        signals.redirect_probe.push(ProbeHop {
            url: robots_url.clone(),
            status: response.status,
        });
        if !response.ok() {
            log::debug!("robots.txt at {robots_url} answered {}", response.status);
            return Vec::new();
        }

        let rules = parse_robots(&response.text());
        signals.robots.allows_target = rules.allows(target_path);
        signals.robots.disallow_rule_count = rules.disallows.len();
        rules.sitemaps
    }

    async fn probe_default_sitemap(&self, origin: &str, signals: &mut SiteSignals) {
        let sitemap_url = format!("{origin}/sitemap.xml");
        match self.client.fetch(&sitemap_url, &FetchOptions::head()).await {
            Ok(response) if response.ok() => {
                signals.redirect_probe.push(ProbeHop {
                    url: sitemap_url.clone(),
                    status: response.status,
                });
                signals.sitemap = SitemapInfo {
                    urls: vec![sitemap_url],
                    discovered_by_default_probe: true,
                };
            }
            Ok(response) => {
                log::debug!("No sitemap at {sitemap_url} ({})", response.status);
            }
            Err(e) => log::debug!("Default sitemap probe failed for {sitemap_url}: {e}"),
        }
    }
}
