//! Network telemetry: response capture and derived counters.
//!
//! Responses are tapped by a background task that owns a [`TelemetryAccumulator`]
//! and hands it back once the caller cancels the capture. Nothing is shared
//! between the navigation and the capture task while it runs.

use std::collections::HashMap;

use futures::stream::BoxStream;
use futures::StreamExt;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::service::ResponseEvent;
use crate::config::{HEADER_CACHE_CONTROL, HEADER_CONTENT_LENGTH, MAX_RESOURCE_EVENTS, TOP_DOMAINS_LIMIT};

/// JavaScript returning navigation timings relative to navigation start (ms).
pub(crate) const NAVIGATION_TIMINGS_SCRIPT: &str = r#"(() => {
  const t = performance.timing;
  return {
    ttfb: t.responseStart - t.navigationStart,
    domContentLoaded: t.domContentLoadedEventEnd - t.navigationStart,
    load: t.loadEventEnd - t.navigationStart
  };
})()"#;

/// JavaScript returning browser resource-timing entries as `{name, transferSize}`.
pub(crate) const RESOURCE_TIMING_SCRIPT: &str = r#"(() =>
  (performance.getEntriesByType("resource") || []).map(e => ({
    name: e.name,
    transferSize: e.transferSize || 0
  }))
)()"#;

/// One network response in the resource inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceEvent {
    /// Response URL
    pub url: String,
    /// HTTP status
    pub status: u16,
    /// Browser resource type
    pub resource_type: String,
    /// `content-length` when present and numeric
    pub byte_size: Option<u64>,
    /// Served by a service worker or answered with 304
    pub from_cache: bool,
    /// `http`, `https` or empty for other schemes
    pub protocol: String,
    /// `cache-control` header value, empty when absent
    pub cache_control: String,
}

impl ResourceEvent {
    /// Converts a raw response event. `data:` URLs yield `None`.
    pub fn from_response(event: ResponseEvent) -> Option<Self> {
        if event.url.starts_with("data:") {
            return None;
        }

        let byte_size = event
            .headers
            .get(HEADER_CONTENT_LENGTH)
            .and_then(|v| v.trim().parse::<u64>().ok());
        let cache_control = event
            .headers
            .get(HEADER_CACHE_CONTROL)
            .cloned()
            .unwrap_or_default();
        let protocol = if event.url.starts_with("https:") {
            "https"
        } else if event.url.starts_with("http:") {
            "http"
        } else {
            ""
        };

        Some(Self {
            from_cache: event.from_service_worker || event.status == 304,
            status: event.status,
            resource_type: event.resource_type,
            protocol: protocol.to_string(),
            url: event.url,
            byte_size,
            cache_control,
        })
    }
}

/// Order-preserving collection of observed responses.
#[derive(Debug, Default)]
pub struct TelemetryAccumulator {
    events: Vec<ResourceEvent>,
}

impl TelemetryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a response, dropping `data:` URLs.
    pub fn record(&mut self, event: ResponseEvent) {
        if let Some(resource) = ResourceEvent::from_response(event) {
            self.events.push(resource);
        }
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Finishes capture, returning all events in observation order.
    pub fn into_events(self) -> Vec<ResourceEvent> {
        self.events
    }
}

/// Drains `stream` into `acc` until the stream ends or `token` is cancelled.
///
/// Events already buffered when cancellation arrives are still recorded.
pub async fn capture_responses(
    mut stream: BoxStream<'static, ResponseEvent>,
    mut acc: TelemetryAccumulator,
    token: CancellationToken,
) -> TelemetryAccumulator {
    loop {
        tokio::select! {
            biased;
            event = stream.next() => match event {
                Some(event) => acc.record(event),
                None => break,
            },
            _ = token.cancelled() => {
                while let Some(Some(event)) = futures::FutureExt::now_or_never(stream.next()) {
                    acc.record(event);
                }
                break;
            }
        }
    }
    log::debug!("Captured {} network responses", acc.len());
    acc
}

/// Navigation timings in milliseconds relative to navigation start.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NavigationTimings {
    /// Time to first byte
    pub ttfb: Option<i64>,
    /// `DOMContentLoaded` end
    pub dom_content_loaded: Option<i64>,
    /// `load` end
    pub load: Option<i64>,
}

impl NavigationTimings {
    /// Reads the result of [`NAVIGATION_TIMINGS_SCRIPT`]. Missing, non-numeric
    /// or negative fields stay `None`; `load` is negative while the event is
    /// still pending.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(|v| v.as_f64())
                .filter(|v| *v >= 0.0)
                .map(|v| v.round() as i64)
        };
        Self {
            ttfb: field("ttfb"),
            dom_content_loaded: field("domContentLoaded"),
            load: field("load"),
        }
    }
}

/// Request count per hostname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainCount {
    /// Hostname
    pub domain: String,
    /// Number of resource-timing entries for it
    pub count: usize,
}

/// Summary of the browser's resource-timing buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceTiming {
    /// Number of entries
    pub entries: usize,
    /// Sum of `transferSize`
    pub total_transfer: u64,
    /// Most frequent hostnames, count-descending (ties keep first-seen order)
    pub top_domains: Vec<DomainCount>,
}

impl ResourceTiming {
    /// Summarizes the result of [`RESOURCE_TIMING_SCRIPT`].
    pub fn from_value(value: &serde_json::Value) -> Self {
        let Some(entries) = value.as_array() else {
            return Self::default();
        };

        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut total_transfer = 0u64;

        for entry in entries {
            let transfer = entry
                .get("transferSize")
                .and_then(|v| v.as_f64())
                .filter(|v| *v > 0.0)
                .map(|v| v as u64)
                .unwrap_or(0);
            total_transfer = total_transfer.saturating_add(transfer);

            let host = entry
                .get("name")
                .and_then(|v| v.as_str())
                .and_then(crate::utils::host_of);
            if let Some(host) = host {
                let count = counts.entry(host.clone()).or_insert(0);
                if *count == 0 {
                    order.push(host);
                }
                *count += 1;
            }
        }

        let mut top_domains: Vec<DomainCount> = order
            .into_iter()
            .map(|domain| DomainCount {
                count: counts.get(&domain).copied().unwrap_or(0),
                domain,
            })
            .collect();
        top_domains.sort_by(|a, b| b.count.cmp(&a.count));
        top_domains.truncate(TOP_DOMAINS_LIMIT);

        Self {
            entries: entries.len(),
            total_transfer,
            top_domains,
        }
    }
}

/// Counters derived from the captured responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceSummary {
    /// Responses observed (before inventory truncation)
    pub requests: usize,
    /// Sum of `content-length`, or the resource-timing transfer total when that sum is zero
    pub total_bytes: u64,
    /// Browser resource-timing entries
    pub resource_timing_entries: usize,
    /// Most frequent hostnames
    pub top_domains: Vec<DomainCount>,
    /// Plain-http responses on an https page
    pub mixed_content_count: usize,
    /// Responses served from a service worker or with 304
    pub cached_count: usize,
    /// Responses without `cache-control`
    pub cache_control_missing: usize,
}

/// Derives the resource counters for a page whose final URL is `final_url`.
///
/// Mixed content is only counted when the page is https and at least one
/// response was observed.
pub fn summarize(events: &[ResourceEvent], final_url: &str, timing: ResourceTiming) -> ResourceSummary {
    let bytes_from_responses = events
        .iter()
        .filter_map(|e| e.byte_size)
        .fold(0u64, u64::saturating_add);
    let total_bytes = if bytes_from_responses > 0 {
        bytes_from_responses
    } else {
        timing.total_transfer
    };

    let mixed_content_count = if final_url.starts_with("https://") && !events.is_empty() {
        events.iter().filter(|e| e.protocol == "http").count()
    } else {
        0
    };

    ResourceSummary {
        requests: events.len(),
        total_bytes,
        resource_timing_entries: timing.entries,
        top_domains: timing.top_domains,
        mixed_content_count,
        cached_count: events.iter().filter(|e| e.from_cache).count(),
        cache_control_missing: events.iter().filter(|e| e.cache_control.is_empty()).count(),
    }
}

/// Truncates the inventory handed downstream.
pub fn truncate_inventory(mut events: Vec<ResourceEvent>) -> Vec<ResourceEvent> {
    events.truncate(MAX_RESOURCE_EVENTS);
    events
}
