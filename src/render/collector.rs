//! Render stage: navigation with fallback, telemetry capture, screenshots.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use super::service::{BrowsingContext, Navigation, PageSnapshot, RenderingService, Viewport, WaitStrategy};
use super::telemetry::{
    capture_responses, summarize, truncate_inventory, NavigationTimings, ResourceTiming,
    TelemetryAccumulator, NAVIGATION_TIMINGS_SCRIPT, RESOURCE_TIMING_SCRIPT,
};
use super::types::{RenderResult, ScreenshotRefs};
use crate::config::{
    DESKTOP_SETTLE_INTERVAL, MOBILE_SETTLE_INTERVAL, MOBILE_USER_AGENT, NAVIGATION_TIMEOUT,
};
use crate::error_handling::{AuditError, DegradedStage, RenderError, Stage, StageError};

/// Drives the rendering service for one audit.
///
/// Owns two browsing contexts for the duration of [`collect`](Self::collect):
/// desktop first, then mobile against the already-resolved final URL. Both are
/// closed on every exit path.
pub struct RenderCollector {
    service: Arc<dyn RenderingService>,
    output_dir: PathBuf,
    navigation_timeout: Duration,
    desktop_settle: Duration,
    mobile_settle: Duration,
}

/// Desktop pass output before the mobile pass runs.
struct DesktopCapture {
    navigation: Navigation,
    snapshot: PageSnapshot,
    timings: NavigationTimings,
    timing: ResourceTiming,
    accumulator: TelemetryAccumulator,
    screenshot: String,
    degraded: Vec<DegradedStage>,
}

impl RenderCollector {
    /// Creates a collector writing screenshots to `output_dir`.
    pub fn new(service: Arc<dyn RenderingService>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            service,
            output_dir: output_dir.into(),
            navigation_timeout: NAVIGATION_TIMEOUT,
            desktop_settle: DESKTOP_SETTLE_INTERVAL,
            mobile_settle: MOBILE_SETTLE_INTERVAL,
        }
    }

    /// Overrides the settle intervals (desktop, mobile).
    pub fn with_settle_intervals(mut self, desktop: Duration, mobile: Duration) -> Self {
        self.desktop_settle = desktop;
        self.mobile_settle = mobile;
        self
    }

    /// Overrides the per-attempt navigation ceiling.
    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Renders `url` and returns the collected result.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::RenderFailure` when no desktop context can be opened
    /// or both wait strategies fail. Everything after navigation degrades.
    pub async fn collect(&self, url: &str) -> Result<RenderResult, AuditError> {
        let stamp = Utc::now().timestamp_millis();
        log::info!("Rendering {}", url);

        let mut desktop = self
            .service
            .new_context(Viewport::desktop(), None)
            .await
            .map_err(|e| AuditError::RenderFailure {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        let capture = self.desktop_pass(desktop.as_mut(), url, stamp).await;
        desktop.close().await;
        let capture = capture?;

        let final_url = if capture.snapshot.final_url.is_empty() {
            capture.navigation.final_url.clone()
        } else {
            capture.snapshot.final_url.clone()
        };

        let mut degraded = capture.degraded;
        let mobile = match self.mobile_pass(&final_url, stamp).await {
            Ok(path) => path,
            Err(e) => {
                degraded.push(DegradedStage::record(Stage::Screenshot, format!("mobile: {e}")));
                String::new()
            }
        };

        let events = capture.accumulator.into_events();
        let summary = summarize(&events, &final_url, capture.timing);
        log::info!(
            "Rendered {} (status {:?}, {} responses, {} bytes)",
            final_url,
            capture.navigation.status,
            summary.requests,
            summary.total_bytes
        );

        Ok(RenderResult {
            requested_url: url.to_string(),
            final_url,
            html: capture.snapshot.html,
            title: capture.snapshot.title,
            http_status: capture.navigation.status,
            response_headers: capture.navigation.headers,
            redirect_chain: capture.navigation.redirect_chain,
            timings: capture.timings,
            resources: truncate_inventory(events),
            summary,
            screenshots: ScreenshotRefs {
                desktop: capture.screenshot,
                mobile,
            },
            degraded,
        })
    }

    async fn desktop_pass(
        &self,
        ctx: &mut dyn BrowsingContext,
        url: &str,
        stamp: i64,
    ) -> Result<DesktopCapture, AuditError> {
        let mut degraded = Vec::new();
        let token = CancellationToken::new();
        let _cancel_on_exit = token.clone().drop_guard();

        let capture = match ctx.listen_responses().await {
            Ok(stream) => Some(tokio::spawn(capture_responses(
                stream,
                TelemetryAccumulator::new(),
                token.clone(),
            ))),
            Err(e) => {
                degraded.push(DegradedStage::record(Stage::Telemetry, e));
                None
            }
        };

        let navigation = navigate_with_fallback(ctx, url, self.navigation_timeout).await?;
        tokio::time::sleep(self.desktop_settle).await;

        let snapshot = match ctx.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                degraded.push(DegradedStage::record(Stage::Render, e));
                PageSnapshot {
                    final_url: navigation.final_url.clone(),
                    ..Default::default()
                }
            }
        };

        let timings = match ctx.evaluate(NAVIGATION_TIMINGS_SCRIPT).await {
            Ok(value) => NavigationTimings::from_value(&value),
            Err(e) => {
                degraded.push(DegradedStage::record(Stage::Telemetry, e));
                NavigationTimings::default()
            }
        };
        let timing = match ctx.evaluate(RESOURCE_TIMING_SCRIPT).await {
            Ok(value) => ResourceTiming::from_value(&value),
            Err(e) => {
                degraded.push(DegradedStage::record(Stage::Telemetry, e));
                ResourceTiming::default()
            }
        };

        let screenshot = match self.capture_screenshot(ctx, false, "desktop", stamp).await {
            Ok(path) => path,
            Err(e) => {
                degraded.push(DegradedStage::record(Stage::Screenshot, format!("desktop: {e}")));
                String::new()
            }
        };

        token.cancel();
        let accumulator = match capture {
            Some(handle) => handle.await.unwrap_or_else(|e| {
                degraded.push(DegradedStage::record(Stage::Telemetry, e));
                TelemetryAccumulator::new()
            }),
            None => TelemetryAccumulator::new(),
        };

        Ok(DesktopCapture {
            navigation,
            snapshot,
            timings,
            timing,
            accumulator,
            screenshot,
            degraded,
        })
    }

    async fn mobile_pass(&self, final_url: &str, stamp: i64) -> Result<String, StageError> {
        let mut mobile = self
            .service
            .new_context(Viewport::mobile(), Some(MOBILE_USER_AGENT))
            .await?;

        let result = async {
            navigate_with_fallback(mobile.as_mut(), final_url, self.navigation_timeout)
                .await
                .map_err(|e| RenderError::Navigation {
                    url: final_url.to_string(),
                    reason: e.to_string(),
                })?;
            tokio::time::sleep(self.mobile_settle).await;
            self.capture_screenshot(mobile.as_mut(), true, "mobile", stamp).await
        }
        .await;

        mobile.close().await;
        result
    }

    async fn capture_screenshot(
        &self,
        ctx: &mut dyn BrowsingContext,
        full_page: bool,
        label: &str,
        stamp: i64,
    ) -> Result<String, StageError> {
        let png = ctx.screenshot(full_page).await?;
        let path = screenshot_path(&self.output_dir, label, stamp);
        tokio::fs::create_dir_all(&self.output_dir).await?;
        tokio::fs::write(&path, png).await?;
        log::debug!("Wrote {} screenshot to {}", label, path.display());
        Ok(path.to_string_lossy().into_owned())
    }
}

fn screenshot_path(output_dir: &Path, label: &str, stamp: i64) -> PathBuf {
    output_dir.join(format!("screenshot-{label}-{stamp}.png"))
}

/// Navigates with the content-loaded strategy, retrying once with fully-loaded.
async fn navigate_with_fallback(
    ctx: &mut dyn BrowsingContext,
    url: &str,
    timeout: Duration,
) -> Result<Navigation, AuditError> {
    let primary = match ctx.navigate(url, WaitStrategy::ContentLoaded, timeout).await {
        Ok(navigation) => return Ok(navigation),
        Err(e) => e,
    };
    log::warn!(
        "Navigation ({}) failed for {}: {}; retrying with {}",
        WaitStrategy::ContentLoaded.as_str(),
        url,
        primary,
        WaitStrategy::FullyLoaded.as_str()
    );

    ctx.navigate(url, WaitStrategy::FullyLoaded, timeout)
        .await
        .map_err(|fallback| AuditError::RenderFailure {
            url: url.to_string(),
            reason: format!(
                "{}: {}; {}: {}",
                WaitStrategy::ContentLoaded.as_str(),
                primary,
                WaitStrategy::FullyLoaded.as_str(),
                fallback
            ),
        })
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
