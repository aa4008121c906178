//! HTTP API for on-demand audits.
//!
//! Endpoints:
//! - `POST /api/run-report` - audit a URL and write its report artifacts
//! - `GET /output/:file` - download a generated artifact
//! - `GET /health` - liveness check

mod handlers;
mod links;
mod types;

use axum::routing::{get, post};
use axum::Router;

use handlers::{artifact_handler, health_handler, run_report_handler};
pub use links::{artifact_url, public_base_url};
pub use types::{ErrorResponse, RunReportRequest, RunReportResponse, ServerState};

/// Builds the API router.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/run-report", post(run_report_handler))
        .route("/output/:file", get(artifact_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Binds `0.0.0.0:<port>` and serves the API until the process exits.
pub async fn start_server(port: u16, state: ServerState) -> Result<(), anyhow::Error> {
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind API server to port {}: {}", port, e))?;

    log::info!("API server listening on http://0.0.0.0:{}/", port);
    log::info!("  - Run report: POST http://0.0.0.0:{}/api/run-report", port);
    log::info!("  - Health: http://0.0.0.0:{}/health", port);

    axum::serve(listener, router(state))
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))?;

    Ok(())
}
