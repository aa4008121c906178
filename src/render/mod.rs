//! Page rendering.
//!
//! - [`service`]: the `RenderingService`/`BrowsingContext` capability traits
//! - [`chromium`]: chromiumoxide implementation
//! - [`telemetry`]: response capture and derived counters
//! - [`RenderCollector`]: the render stage of an audit

pub mod chromium;
mod collector;
pub mod service;
pub mod telemetry;
mod types;

pub use chromium::ChromiumRenderingService;
pub use collector::RenderCollector;
pub use service::{
    BrowsingContext, Navigation, PageSnapshot, RedirectHop, RenderingService, ResponseEvent,
    Viewport, WaitStrategy,
};
pub use telemetry::{DomainCount, NavigationTimings, ResourceEvent, ResourceSummary};
pub use types::{RenderResult, ScreenshotRefs};
