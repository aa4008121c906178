//! Site-level crawl directives: robots.txt, sitemap discovery, security headers.

mod inspector;
mod robots;
mod security;
mod types;

pub use inspector::SiteInspector;
pub use robots::{parse_robots, RobotsRules};
pub use security::{SecurityHeaders, SecurityWarning};
pub use types::{ProbeHop, RobotsInfo, SiteSignals, SitemapInfo};
