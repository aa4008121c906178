//! Rendering capability.
//!
//! [`RenderingService`] creates independent [`BrowsingContext`]s (one per
//! viewport/user-agent combination); a context navigates, exposes the network
//! response stream, reads the DOM and captures images. The audit core only sees
//! these traits, so tests drive it with in-memory fakes.

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::Serialize;

use crate::config::{
    DESKTOP_VIEWPORT_HEIGHT, DESKTOP_VIEWPORT_WIDTH, MOBILE_VIEWPORT_HEIGHT, MOBILE_VIEWPORT_WIDTH,
};
use crate::error_handling::RenderError;
use crate::http::Headers;

/// Browser viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// CSS pixel width
    pub width: u32,
    /// CSS pixel height
    pub height: u32,
    /// Emulate a mobile device (touch, mobile layout)
    pub mobile: bool,
}

impl Viewport {
    /// 1280x900 desktop viewport.
    pub const fn desktop() -> Self {
        Self {
            width: DESKTOP_VIEWPORT_WIDTH,
            height: DESKTOP_VIEWPORT_HEIGHT,
            mobile: false,
        }
    }

    /// 390x844 phone viewport.
    pub const fn mobile() -> Self {
        Self {
            width: MOBILE_VIEWPORT_WIDTH,
            height: MOBILE_VIEWPORT_HEIGHT,
            mobile: true,
        }
    }
}

/// When a navigation counts as finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStrategy {
    /// `DOMContentLoaded` fired
    ContentLoaded,
    /// `load` fired (all subresources finished)
    FullyLoaded,
}

impl WaitStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitStrategy::ContentLoaded => "content-loaded",
            WaitStrategy::FullyLoaded => "fully-loaded",
        }
    }
}

/// One hop of the main document's redirect chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectHop {
    /// Requested URL of this hop
    pub url: String,
    /// Request method
    pub method: String,
    /// Response status, when observed
    pub status: Option<u16>,
}

/// Outcome of a successful navigation.
#[derive(Debug, Clone, Default)]
pub struct Navigation {
    /// URL after redirects
    pub final_url: String,
    /// Status of the main document response
    pub status: Option<u16>,
    /// Main document response headers, lowercase names
    pub headers: Headers,
    /// Redirect hops followed by the final request
    pub redirect_chain: Vec<RedirectHop>,
}

/// DOM state read after navigation settled.
#[derive(Debug, Clone, Default)]
pub struct PageSnapshot {
    /// Current document URL
    pub final_url: String,
    /// Serialized DOM
    pub html: String,
    /// Document title
    pub title: String,
}

/// A network response observed by a browsing context.
#[derive(Debug, Clone, Default)]
pub struct ResponseEvent {
    /// Response URL
    pub url: String,
    /// HTTP status
    pub status: u16,
    /// Browser resource type (`document`, `script`, `image`, ...)
    pub resource_type: String,
    /// Response headers, lowercase names
    pub headers: Headers,
    /// Served by a service worker
    pub from_service_worker: bool,
}

/// Creates browsing contexts.
#[async_trait]
pub trait RenderingService: Send + Sync {
    /// Opens a new, independent browsing context.
    async fn new_context(
        &self,
        viewport: Viewport,
        user_agent: Option<&str>,
    ) -> Result<Box<dyn BrowsingContext>, RenderError>;
}

/// A single browsing context (tab) owned by one caller.
///
/// Callers must `close` every context they open, on every exit path.
#[async_trait]
pub trait BrowsingContext: Send + Sync {
    /// Subscribes to network responses. Must be called before `navigate` to see
    /// the main document and its subresources.
    async fn listen_responses(&mut self) -> Result<BoxStream<'static, ResponseEvent>, RenderError>;

    /// Navigates and waits for `wait`, failing after `timeout`.
    async fn navigate(
        &mut self,
        url: &str,
        wait: WaitStrategy,
        timeout: Duration,
    ) -> Result<Navigation, RenderError>;

    /// Reads the current URL, serialized DOM and title.
    async fn snapshot(&self) -> Result<PageSnapshot, RenderError>;

    /// Evaluates a JavaScript expression and returns its JSON value.
    async fn evaluate(&self, script: &str) -> Result<serde_json::Value, RenderError>;

    /// PNG screenshot of the viewport, or of the whole page when `full_page`.
    async fn screenshot(&self, full_page: bool) -> Result<Vec<u8>, RenderError>;

    /// Prints the current document to an A4 PDF.
    async fn print_pdf(&self) -> Result<Vec<u8>, RenderError>;

    /// Releases the context. Failures are logged, never returned.
    async fn close(self: Box<Self>);
}
