use serde::Serialize;

use super::security::SecurityHeaders;

/// One probed site-level URL and the status it answered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeHop {
    pub url: String,
    pub status: u16,
}

/// robots.txt findings for the audited page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RobotsInfo {
    pub url: String,
    /// `None` when robots.txt could not be fetched at all
    pub status: Option<u16>,
    pub allows_target: bool,
    pub disallow_rule_count: usize,
    pub error: Option<String>,
    /// `X-Robots-Tag` response header of the rendered page
    pub x_robots_header: String,
}

impl Default for RobotsInfo {
    fn default() -> Self {
        Self {
            url: String::new(),
            status: None,
            allows_target: true,
            disallow_rule_count: 0,
            error: None,
            x_robots_header: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SitemapInfo {
    pub urls: Vec<String>,
    /// The only entry came from probing `/sitemap.xml`
    pub discovered_by_default_probe: bool,
}

/// Site-level crawl directives and security headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteSignals {
    pub redirect_probe: Vec<ProbeHop>,
    pub robots: RobotsInfo,
    pub sitemap: SitemapInfo,
    pub security_headers: SecurityHeaders,
}
