//! Render stage output.

use serde::Serialize;

use super::service::RedirectHop;
use super::telemetry::{NavigationTimings, ResourceEvent, ResourceSummary};
use crate::error_handling::DegradedStage;
use crate::http::Headers;

/// Screenshot file paths; empty when capture failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScreenshotRefs {
    /// Viewport-only desktop capture
    pub desktop: String,
    /// Full-page mobile capture
    pub mobile: String,
}

/// Everything the render stage observed about the target.
///
/// Produced once per audit and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct RenderResult {
    /// URL as requested
    pub requested_url: String,
    /// URL after redirects and client-side navigation
    pub final_url: String,
    /// Serialized DOM after the settle interval
    pub html: String,
    /// Document title
    pub title: String,
    /// Main document status
    pub http_status: Option<u16>,
    /// Main document response headers, lowercase names
    pub response_headers: Headers,
    /// Redirect hops of the main document, in order
    pub redirect_chain: Vec<RedirectHop>,
    /// Navigation timing marks
    pub timings: NavigationTimings,
    /// Resource inventory, first entries only
    pub resources: Vec<ResourceEvent>,
    /// Counters over all observed responses
    pub summary: ResourceSummary,
    /// Screenshot paths
    pub screenshots: ScreenshotRefs,
    /// Non-fatal failures during rendering
    pub degraded: Vec<DegradedStage>,
}
