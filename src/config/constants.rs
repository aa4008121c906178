//! Configuration constants.
//!
//! Fixed design constants used throughout the audit pipeline: timeouts,
//! sample caps, browser viewports and scoring thresholds. None of these are
//! user-configurable; the tunable knobs live in [`super::Config`].

use std::time::Duration;

// Rendering
/// Navigation ceiling for both wait strategies (content loaded, fully loaded).
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(120);
/// Settle interval after desktop navigation before reading the DOM.
/// Telemetry keeps arriving asynchronously; this bounds how long we wait for it.
pub const DESKTOP_SETTLE_INTERVAL: Duration = Duration::from_millis(2500);
/// Settle interval after mobile navigation before the full-page screenshot.
pub const MOBILE_SETTLE_INTERVAL: Duration = Duration::from_millis(2000);
/// Maximum resource events exposed in the report inventory.
pub const MAX_RESOURCE_EVENTS: usize = 200;
/// Number of hostnames listed in the resource-timing top-domains summary.
pub const TOP_DOMAINS_LIMIT: usize = 5;

/// Desktop viewport width in CSS pixels.
pub const DESKTOP_VIEWPORT_WIDTH: u32 = 1280;
/// Desktop viewport height in CSS pixels.
pub const DESKTOP_VIEWPORT_HEIGHT: u32 = 900;
/// Mobile viewport width in CSS pixels (iPhone 12/13/14 class device).
pub const MOBILE_VIEWPORT_WIDTH: u32 = 390;
/// Mobile viewport height in CSS pixels.
pub const MOBILE_VIEWPORT_HEIGHT: u32 = 844;

/// User agent used for the mobile browsing context.
pub const MOBILE_USER_AGENT: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 15_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/15.0 Mobile/15E148 Safari/604.1";

/// Default User-Agent string for plain HTTP requests (robots.txt, link checks, tech fetch).
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Network operation timeouts
/// Default timeout for plain HTTP fetches (robots.txt, sitemap probe, tech fetch)
pub const HTTP_TIMEOUT_SECS: u64 = 10;
/// Per-request timeout for link reachability checks (HEAD and the GET fallback each)
pub const LINK_CHECK_TIMEOUT: Duration = Duration::from_secs(8);
/// Upper bound for a Lighthouse CLI run
pub const LIGHTHOUSE_TIMEOUT: Duration = Duration::from_secs(180);

// Response and body size limits
/// Maximum response body size in bytes (2MB)
/// Larger bodies are truncated before parsing to prevent memory exhaustion
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

// Redirect handling
/// Maximum number of redirect hops reqwest follows for redirect-following fetches
pub const MAX_REDIRECT_HOPS: usize = 10;

// Link sampling
/// Internal links checked per audit (first N in document order)
pub const MAX_INTERNAL_LINK_CHECKS: usize = 15;
/// External links checked per audit (first N in document order)
pub const MAX_EXTERNAL_LINK_CHECKS: usize = 15;
/// Broken-link samples kept in the report
pub const MAX_BROKEN_SAMPLES: usize = 10;
/// Internal/external link samples kept in the report (each)
pub const MAX_LINK_SAMPLES: usize = 15;
/// Link checks in flight at once
pub const LINK_CHECK_CONCURRENCY: usize = 5;
/// Anchor text is truncated to this many characters
pub const MAX_ANCHOR_TEXT_CHARS: usize = 140;

// On-page limits
/// Images without alt text listed as samples
pub const MAX_MISSING_ALT_SAMPLES: usize = 20;

// Technology fingerprinting
/// Script and stylesheet URL samples (each list)
pub const MAX_ASSET_SAMPLES: usize = 25;

// Scoring thresholds
/// Inclusive title length range (characters) that earns full title points
pub const TITLE_LENGTH_RANGE: std::ops::RangeInclusive<usize> = 30..=65;
/// Inclusive meta description length range (characters) that earns full points
pub const DESCRIPTION_LENGTH_RANGE: std::ops::RangeInclusive<usize> = 50..=170;
/// Heading count that must be exceeded to earn full heading points
pub const HEADING_COUNT_THRESHOLD: usize = 6;
/// Total link count at which the link volume component saturates
pub const LINK_VOLUME_SATURATION: f64 = 50.0;
/// Maximum points from link volume
pub const LINK_VOLUME_MAX_POINTS: f64 = 60.0;
/// Stand-in for any missing external category score
pub const DEFAULT_CATEGORY_SCORE: u8 = 60;
