//! Serves generated report files from the output directory.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use super::super::types::ServerState;

/// Accepts plain file names only: no separators, no parent references.
pub(crate) fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && !name.contains("..")
}

pub(crate) fn content_type(name: &str) -> &'static str {
    match name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "html" => "text/html; charset=utf-8",
        Some(ext) if ext == "json" => "application/json",
        Some(ext) if ext == "pdf" => "application/pdf",
        Some(ext) if ext == "png" => "image/png",
        _ => "application/octet-stream",
    }
}

/// `GET /output/:file`
pub async fn artifact_handler(
    State(state): State<ServerState>,
    Path(file): Path<String>,
) -> Response {
    if !is_safe_file_name(&file) {
        log::warn!("Rejected artifact request for {file:?}");
        return StatusCode::NOT_FOUND.into_response();
    }

    let path = state.config.output_dir.join(&file);
    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type(&file))], bytes).into_response(),
        Err(e) => {
            log::debug!("Artifact {} not served: {e}", path.display());
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
