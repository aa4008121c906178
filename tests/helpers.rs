// Shared test doubles for the audit pipeline.
//
// A scripted rendering service stands in for Chromium and a fixed Lighthouse
// service stands in for the CLI, so the whole pipeline runs against httptest.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;

use site_audit::error_handling::{RenderError, StageError};
use site_audit::http::Headers;
use site_audit::quality::{CategoryScores, LighthouseService, QualityMetrics, QualitySignals};
use site_audit::render::{
    BrowsingContext, Navigation, PageSnapshot, RedirectHop, RenderingService, ResponseEvent,
    Viewport, WaitStrategy,
};

/// What the scripted browser serves.
#[derive(Clone, Default)]
pub struct PageScript {
    pub final_url: String,
    pub html: String,
    pub title: String,
    pub headers: Headers,
    pub fail_navigation: bool,
}

/// Counts opened and closed contexts.
#[derive(Default)]
pub struct ContextCounter {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
}

#[allow(dead_code)] // Used by other test files
impl ContextCounter {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

pub struct ScriptedBrowser {
    pub script: PageScript,
    pub counter: Arc<ContextCounter>,
}

impl ScriptedBrowser {
    pub fn new(script: PageScript) -> Self {
        Self {
            script,
            counter: Arc::new(ContextCounter::default()),
        }
    }
}

struct ScriptedContext {
    script: PageScript,
    counter: Arc<ContextCounter>,
}

#[async_trait]
impl RenderingService for ScriptedBrowser {
    async fn new_context(
        &self,
        _viewport: Viewport,
        _user_agent: Option<&str>,
    ) -> Result<Box<dyn BrowsingContext>, RenderError> {
        self.counter.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedContext {
            script: self.script.clone(),
            counter: Arc::clone(&self.counter),
        }))
    }
}

#[async_trait]
impl BrowsingContext for ScriptedContext {
    async fn listen_responses(&mut self) -> Result<BoxStream<'static, ResponseEvent>, RenderError> {
        let document = ResponseEvent {
            url: self.script.final_url.clone(),
            status: 200,
            resource_type: "document".to_string(),
            headers: self.script.headers.clone(),
            from_service_worker: false,
        };
        Ok(futures::stream::iter(vec![document]).boxed())
    }

    async fn navigate(
        &mut self,
        url: &str,
        _wait: WaitStrategy,
        timeout: Duration,
    ) -> Result<Navigation, RenderError> {
        if self.script.fail_navigation {
            return Err(RenderError::Timeout {
                url: url.to_string(),
                after: timeout,
            });
        }
        Ok(Navigation {
            final_url: self.script.final_url.clone(),
            status: Some(200),
            headers: self.script.headers.clone(),
            redirect_chain: vec![RedirectHop {
                url: url.to_string(),
                method: "GET".to_string(),
                status: Some(200),
            }],
        })
    }

    async fn snapshot(&self) -> Result<PageSnapshot, RenderError> {
        Ok(PageSnapshot {
            final_url: self.script.final_url.clone(),
            html: self.script.html.clone(),
            title: self.script.title.clone(),
        })
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value, RenderError> {
        if script.contains("performance.timing") {
            Ok(serde_json::json!({"ttfb": 120, "domContentLoaded": 640, "load": 1100}))
        } else {
            Ok(serde_json::json!([]))
        }
    }

    async fn screenshot(&self, _full_page: bool) -> Result<Vec<u8>, RenderError> {
        Ok(b"\x89PNG\r\n\x1a\n".to_vec())
    }

    async fn print_pdf(&self) -> Result<Vec<u8>, RenderError> {
        Ok(b"%PDF-1.4\n%%EOF\n".to_vec())
    }

    async fn close(self: Box<Self>) {
        self.counter.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Lighthouse stand-in returning fixed category scores.
pub struct FixedLighthouse(pub CategoryScores);

#[async_trait]
impl LighthouseService for FixedLighthouse {
    async fn score(&self, _url: &str) -> Result<QualitySignals, StageError> {
        Ok(QualitySignals {
            scores: self.0,
            metrics: QualityMetrics {
                largest_contentful_paint: Some("1.8 s".to_string()),
                ..Default::default()
            },
            error: None,
        })
    }
}
