// Report rendering and artifact tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, BoxStream};

use super::*;
use crate::audit::{ReportData, StageOutputs};
use crate::config::Config;
use crate::error_handling::{DegradedStage, RenderError, Stage};
use crate::links::{LinkCheckResult, LinkClass};
use crate::parse::analyze_page;
use crate::render::{
    BrowsingContext, Navigation, PageSnapshot, RenderResult, RenderingService, ResponseEvent,
    ScreenshotRefs, Viewport, WaitStrategy,
};

fn sample_report() -> ReportData {
    let html = r#"<html lang="en"><head><title>Tom &amp; Jerry <script>alert(1)</script></title>
        <link rel="canonical" href="https://example.com/"></head>
        <body><h1>Welcome</h1><img src="/a.png"></body></html>"#;
    let render = RenderResult {
        requested_url: "https://example.com/".to_string(),
        final_url: "https://example.com/".to_string(),
        title: "Tom & Jerry".to_string(),
        http_status: Some(200),
        screenshots: ScreenshotRefs {
            desktop: "output/screenshot-desktop-1.png".to_string(),
            mobile: String::new(),
        },
        ..Default::default()
    };
    let mut stages = StageOutputs {
        onpage: analyze_page(html),
        ..Default::default()
    };
    stages.links.total = 3;
    stages.links.broken_total = 1;
    stages.links.broken_samples.push(LinkCheckResult {
        href: "https://example.com/missing?a=1&b=<2>".to_string(),
        anchor_text: "gone".to_string(),
        http_status: 404,
        link_class: LinkClass::Internal,
    });
    stages.tech.cms = "WordPress".to_string();
    stages.tech.detected = vec!["WordPress".to_string()];
    ReportData::assemble(
        render,
        stages,
        vec![DegradedStage::record(Stage::Quality, "Lighthouse disabled")],
    )
}

#[test]
fn test_render_html_contains_sections() {
    let html = render_html(&sample_report());
    assert!(html.starts_with("<!DOCTYPE html>"));
    for section in [
        "Scores",
        "SEO analysis",
        "Lighthouse metrics",
        "Link status",
        "Technology &amp; resources",
        "Health &amp; issues",
        "Indexing",
        "Images &amp; accessibility",
        "Redirects &amp; status",
        "Structured data",
        "Mobile view",
        "Incomplete data",
    ] {
        assert!(html.contains(section), "missing section {section}");
    }
}

#[test]
fn test_complete_stages_exclude_degraded() {
    let report = sample_report();
    let complete = report.complete_stages();
    assert_eq!(complete.len(), 7);
    assert_eq!(complete.first(), Some(&Stage::Render));
    assert!(!complete.contains(&Stage::Quality));

    let html = render_html(&report);
    assert!(html.contains("Complete: render, screenshot, telemetry"));
    assert!(!html.contains("technology fingerprinting, quality scoring"));
}

#[test]
fn test_render_html_escapes_values() {
    let html = render_html(&sample_report());
    assert!(html.contains("https://example.com/missing?a=1&amp;b=&lt;2&gt; (404)"));
    assert!(!html.contains("<2>"));
    assert!(html.contains("Tom &amp; Jerry"));
}

#[test]
fn test_render_html_screenshots_by_file_name() {
    let html = render_html(&sample_report());
    assert!(html.contains(r#"<img src="screenshot-desktop-1.png" alt="Desktop">"#));
    assert!(html.contains("No mobile screenshot"));
}

#[test]
fn test_render_html_shows_scores() {
    let report = sample_report();
    let html = render_html(&report);
    assert!(html.contains(&format!(
        r#"<div class="display-score">{}</div>"#,
        report.scores.composite
    )));
    assert!(html.contains(&format!("On-page score: {}", report.scores.onpage)));
}

#[test]
fn test_report_json_shape() {
    let value = serde_json::to_value(sample_report()).expect("serialize");
    assert_eq!(value["final_url"], "https://example.com/");
    assert_eq!(value["http_status"], 200);
    assert_eq!(value["tech"]["cms"], "WordPress");
    assert_eq!(value["degraded_stages"][0]["stage"], "quality");
    assert!(value["scores"]["composite"].is_u64());
    assert!(value["generated_at"].is_string());
}

#[derive(Default)]
struct PdfCalls {
    contexts: AtomicUsize,
    closed: AtomicUsize,
}

struct FakePdfService {
    fail: bool,
    calls: Arc<PdfCalls>,
}

struct FakePdfContext {
    fail: bool,
    calls: Arc<PdfCalls>,
}

#[async_trait]
impl RenderingService for FakePdfService {
    async fn new_context(
        &self,
        _viewport: Viewport,
        _user_agent: Option<&str>,
    ) -> Result<Box<dyn BrowsingContext>, RenderError> {
        self.calls.contexts.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakePdfContext {
            fail: self.fail,
            calls: Arc::clone(&self.calls),
        }))
    }
}

#[async_trait]
impl BrowsingContext for FakePdfContext {
    async fn listen_responses(&mut self) -> Result<BoxStream<'static, ResponseEvent>, RenderError> {
        Ok(Box::pin(stream::empty()))
    }

    async fn navigate(
        &mut self,
        url: &str,
        _wait: WaitStrategy,
        _timeout: Duration,
    ) -> Result<Navigation, RenderError> {
        assert!(url.starts_with("file://"));
        Ok(Navigation {
            final_url: url.to_string(),
            status: None,
            headers: Default::default(),
            redirect_chain: Vec::new(),
        })
    }

    async fn snapshot(&self) -> Result<PageSnapshot, RenderError> {
        Ok(PageSnapshot {
            final_url: String::new(),
            html: String::new(),
            title: String::new(),
        })
    }

    async fn evaluate(&self, _script: &str) -> Result<serde_json::Value, RenderError> {
        Ok(serde_json::Value::Null)
    }

    async fn screenshot(&self, _full_page: bool) -> Result<Vec<u8>, RenderError> {
        Ok(Vec::new())
    }

    async fn print_pdf(&self) -> Result<Vec<u8>, RenderError> {
        if self.fail {
            return Err(RenderError::PageOperation {
                operation: "print_pdf",
                reason: "printing disabled".to_string(),
            });
        }
        Ok(b"%PDF-1.7 fake".to_vec())
    }

    async fn close(self: Box<Self>) {
        self.calls.closed.fetch_add(1, Ordering::SeqCst);
    }
}

fn config_in(dir: &std::path::Path, export_pdf: bool) -> Arc<Config> {
    Arc::new(Config {
        output_dir: dir.to_path_buf(),
        export_pdf,
        ..Default::default()
    })
}

fn pdf_service(fail: bool, calls: &Arc<PdfCalls>) -> Option<Arc<dyn RenderingService>> {
    Some(Arc::new(FakePdfService {
        fail,
        calls: Arc::clone(calls),
    }))
}

fn assert_send<F: std::future::Future + Send>(future: F) -> F {
    future
}

#[tokio::test]
async fn test_write_artifacts_without_renderer() {
    let dir = tempfile::tempdir().expect("tempdir");
    let report = sample_report();
    let artifacts = write_artifacts(&report, config_in(dir.path(), true), None)
        .await
        .expect("artifacts");

    let stamp = report.artifact_stamp();
    assert_eq!(artifacts.html_path, dir.path().join(format!("report-{stamp}.html")));
    assert!(artifacts.pdf_path.is_none());

    let html = std::fs::read_to_string(&artifacts.html_path).expect("html");
    assert!(html.contains("SEO analysis"));
    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&artifacts.json_path).expect("json")).expect("parse");
    assert_eq!(json["requested_url"], "https://example.com/");
}

#[tokio::test]
async fn test_write_artifacts_creates_output_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("nested").join("out");
    let artifacts = write_artifacts(&sample_report(), config_in(&nested, false), None)
        .await
        .expect("artifacts");
    assert!(artifacts.html_path.starts_with(&nested));
    assert!(artifacts.json_path.exists());
}

#[tokio::test]
async fn test_write_artifacts_prints_pdf() {
    let dir = tempfile::tempdir().expect("tempdir");
    let calls = Arc::new(PdfCalls::default());
    let artifacts = write_artifacts(&sample_report(), config_in(dir.path(), true), pdf_service(false, &calls))
        .await
        .expect("artifacts");

    let pdf_path = artifacts.pdf_path.expect("pdf path");
    assert_eq!(std::fs::read(&pdf_path).expect("pdf"), b"%PDF-1.7 fake");
    assert_eq!(calls.contexts.load(Ordering::SeqCst), 1);
    assert_eq!(calls.closed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_pdf_failure_degrades_and_closes_context() {
    let dir = tempfile::tempdir().expect("tempdir");
    let calls = Arc::new(PdfCalls::default());
    let artifacts = write_artifacts(&sample_report(), config_in(dir.path(), true), pdf_service(true, &calls))
        .await
        .expect("artifacts");

    assert!(artifacts.pdf_path.is_none());
    assert!(artifacts.html_path.exists());
    assert_eq!(calls.closed.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_pdf_disabled_skips_renderer() {
    let dir = tempfile::tempdir().expect("tempdir");
    let calls = Arc::new(PdfCalls::default());
    let artifacts = write_artifacts(&sample_report(), config_in(dir.path(), false), pdf_service(false, &calls))
        .await
        .expect("artifacts");

    assert!(artifacts.pdf_path.is_none());
    assert_eq!(calls.contexts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_write_artifacts_future_is_send() {
    let dir = tempfile::tempdir().expect("tempdir");
    let calls = Arc::new(PdfCalls::default());
    let report = sample_report();
    let handle = tokio::spawn(assert_send(async move {
        write_artifacts(&report, config_in(dir.path(), true), pdf_service(false, &calls))
            .await
            .map(|artifacts| artifacts.pdf_path.is_some())
    }));
    assert!(handle.await.expect("join").expect("artifacts"));
}
