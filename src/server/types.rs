//! API state and payloads.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::audit::AuditOrchestrator;
use crate::config::Config;
use crate::render::RenderingService;
use crate::scoring::Scores;

/// Shared state of the API server.
#[derive(Clone)]
pub struct ServerState {
    pub orchestrator: Arc<AuditOrchestrator>,
    /// Used to print PDFs; `None` disables PDF export
    pub renderer: Option<Arc<dyn RenderingService>>,
    pub config: Arc<Config>,
}

/// Body of `POST /api/run-report`.
#[derive(Debug, Default, Deserialize)]
pub struct RunReportRequest {
    pub url: Option<String>,
    /// Accepted for compatibility; only logged
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Successful `POST /api/run-report` response.
#[derive(Debug, Serialize)]
pub struct RunReportResponse {
    pub ok: bool,
    pub html_path: String,
    pub pdf_path: Option<String>,
    pub json_path: String,
    pub html_url: String,
    pub pdf_url: Option<String>,
    pub scores: Scores,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
