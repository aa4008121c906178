//! HTTP API tests: the router served on an ephemeral port, driven with reqwest.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use httptest::{matchers::*, responders::*, Expectation, Server};
use serde_json::{json, Value};

use helpers::{FixedLighthouse, PageScript, ScriptedBrowser};
use site_audit::initialization::init_http_client;
use site_audit::quality::CategoryScores;
use site_audit::render::{RenderCollector, RenderingService};
use site_audit::server::{router, ServerState};
use site_audit::{AuditOrchestrator, Config};

const PAGE: &str = r#"<html lang="en"><head><title>Small page</title></head>
<body><h1>Hello</h1><img src="/logo.png" alt="Logo"></body></html>"#;

/// Final URL for tests that never reach the audit pipeline.
const IDLE_PAGE: &str = "https://small.example/";

struct Api {
    base: String,
    http: reqwest::Client,
    _output: tempfile::TempDir,
}

async fn spawn_api(final_url: &str) -> Api {
    let output = tempfile::tempdir().expect("tempdir");
    let config = Config {
        output_dir: output.path().to_path_buf(),
        http_timeout_seconds: 5,
        public_base_url: Some("http://audits.test/".to_string()),
        ..Default::default()
    };

    let renderer: Arc<dyn RenderingService> = Arc::new(ScriptedBrowser::new(PageScript {
        final_url: final_url.to_string(),
        html: PAGE.to_string(),
        title: "Small page".to_string(),
        ..Default::default()
    }));
    let client = init_http_client(&config).expect("http client");
    let collector = RenderCollector::new(Arc::clone(&renderer), &config.output_dir)
        .with_settle_intervals(Duration::ZERO, Duration::ZERO);
    let orchestrator = AuditOrchestrator::new(
        collector,
        client,
        Arc::new(FixedLighthouse(CategoryScores::default())),
    );

    let state = ServerState {
        orchestrator: Arc::new(orchestrator),
        renderer: Some(renderer),
        config: Arc::new(config),
    };
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router(state)).await;
    });

    Api {
        base: format!("http://{addr}"),
        http: reqwest::Client::new(),
        _output: output,
    }
}

fn small_site() -> Server {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .times(..)
            .respond_with(status_code(200).body(PAGE)),
    );
    server.expect(
        Expectation::matching(request::path("/robots.txt"))
            .times(..)
            .respond_with(status_code(404)),
    );
    server.expect(
        Expectation::matching(request::path("/sitemap.xml"))
            .times(..)
            .respond_with(status_code(404)),
    );
    server
}

#[tokio::test]
async fn test_health() {
    let api = spawn_api(IDLE_PAGE).await;
    let response = api
        .http
        .get(format!("{}/health", api.base))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("json");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_run_report_requires_url() {
    let api = spawn_api(IDLE_PAGE).await;
    let response = api
        .http
        .post(format!("{}/api/run-report", api.base))
        .json(&json!({ "email": "someone@example.com" }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("json");
    assert_eq!(body["error"], "url is required");
}

#[tokio::test]
async fn test_run_report_rejects_unsupported_scheme() {
    let api = spawn_api(IDLE_PAGE).await;
    let response = api
        .http
        .post(format!("{}/api/run-report", api.base))
        .json(&json!({ "url": "ftp://files.example.com/" }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("json");
    assert!(body["error"]
        .as_str()
        .is_some_and(|e| e.contains("unsupported scheme")));
}

#[tokio::test]
async fn test_run_report_returns_artifact_links() {
    let site = small_site();
    let api = spawn_api(&site.url_str("/")).await;

    let response = api
        .http
        .post(format!("{}/api/run-report", api.base))
        .json(&json!({ "url": site.url_str("/") }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("json");

    assert_eq!(body["ok"], true);
    let html_url = body["html_url"].as_str().expect("html_url");
    assert!(html_url.starts_with("http://audits.test/output/report-"), "{html_url}");
    assert!(html_url.ends_with(".html"));
    assert!(body["pdf_url"]
        .as_str()
        .is_some_and(|u| u.ends_with(".pdf")));
    assert!(body["scores"]["composite"].is_u64());

    // The linked file is served by the same API
    let file = html_url.rsplit('/').next().expect("file name");
    let served = api
        .http
        .get(format!("{}/output/{}", api.base, file))
        .send()
        .await
        .expect("request");
    assert_eq!(served.status(), 200);
    assert_eq!(
        served
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("text/html; charset=utf-8")
    );
    assert!(served.text().await.expect("body").contains("Small page"));
}

#[tokio::test]
async fn test_missing_artifact_is_404() {
    let api = spawn_api(IDLE_PAGE).await;
    let response = api
        .http
        .get(format!("{}/output/report-0.html", api.base))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), 404);
}
