//! Runs an audit on request and returns links to its artifacts.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::super::links::{artifact_url, public_base_url};
use super::super::types::{ErrorResponse, RunReportRequest, RunReportResponse, ServerState};
use crate::error_handling::AuditError;
use crate::report::write_artifacts;

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `POST /api/run-report`
pub async fn run_report_handler(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(request): Json<RunReportRequest>,
) -> Response {
    let Some(url) = request.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) else {
        return error(StatusCode::BAD_REQUEST, "url is required");
    };
    if let Some(email) = &request.email {
        log::info!(
            "Report for {url} requested by {email} (phone: {})",
            request.phone.as_deref().unwrap_or("-")
        );
    }

    let report = match state.orchestrator.run(url).await {
        Ok(report) => report,
        Err(e @ AuditError::InvalidTarget { .. }) => {
            return error(StatusCode::BAD_REQUEST, e.to_string());
        }
        Err(e) => {
            log::error!("Audit of {url} failed: {e}");
            return error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    let renderer = state.renderer.clone();
    let artifacts = match write_artifacts(&report, Arc::clone(&state.config), renderer).await {
        Ok(artifacts) => artifacts,
        Err(e) => {
            log::error!("Writing artifacts for {url} failed: {e:#}");
            return error(StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"));
        }
    };

    let host = headers.get(header::HOST).and_then(|h| h.to_str().ok());
    let base = public_base_url(state.config.public_base_url.as_deref(), host);

    Json(RunReportResponse {
        ok: true,
        html_url: artifact_url(&base, &file_name(&artifacts.html_path)),
        pdf_url: artifacts
            .pdf_path
            .as_deref()
            .map(|p| artifact_url(&base, &file_name(p))),
        html_path: display_path(&artifacts.html_path),
        pdf_path: artifacts.pdf_path.as_deref().map(display_path),
        json_path: display_path(&artifacts.json_path),
        scores: report.scores,
    })
    .into_response()
}
