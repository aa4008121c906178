//! Artifact writing: HTML, JSON and an optional PDF print of the HTML.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use url::Url;

use super::html::render_html;
use crate::audit::ReportData;
use crate::config::{Config, NAVIGATION_TIMEOUT};
use crate::error_handling::{RenderError, StageError};
use crate::render::{RenderingService, Viewport, WaitStrategy};

/// Paths of the files written for one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportArtifacts {
    pub html_path: PathBuf,
    pub json_path: PathBuf,
    /// `None` when PDF export was disabled or failed
    pub pdf_path: Option<PathBuf>,
}

/// Writes `report-<ts>.html`, `report-<ts>.json` and, when enabled and a
/// renderer is available, `report-<ts>.pdf` under `config.output_dir`.
///
/// # Errors
///
/// Fails when the output directory or the HTML/JSON files cannot be written.
/// PDF problems are logged and leave `pdf_path` empty.
///
/// The renderer and config are owned so the returned future stays `Send` when
/// awaited from an axum handler.
pub async fn write_artifacts(
    report: &ReportData,
    config: Arc<Config>,
    renderer: Option<Arc<dyn RenderingService>>,
) -> Result<ReportArtifacts> {
    let dir = config.output_dir.clone();
    tokio::fs::create_dir_all(dir.clone())
        .await
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let stamp = report.artifact_stamp();
    let html_path = dir.join(format!("report-{stamp}.html"));
    let json_path = dir.join(format!("report-{stamp}.json"));

    tokio::fs::write(html_path.clone(), render_html(report))
        .await
        .with_context(|| format!("Failed to write {}", html_path.display()))?;
    let json = serde_json::to_vec_pretty(report).context("Failed to serialize report data")?;
    tokio::fs::write(json_path.clone(), json)
        .await
        .with_context(|| format!("Failed to write {}", json_path.display()))?;
    log::info!("Wrote {} and {}", html_path.display(), json_path.display());

    let pdf_path = match renderer {
        Some(renderer) if config.export_pdf => {
            let pdf_path = dir.join(format!("report-{stamp}.pdf"));
            match export_pdf(renderer, &html_path, &pdf_path).await {
                Ok(()) => {
                    log::info!("Wrote {}", pdf_path.display());
                    Some(pdf_path)
                }
                Err(e) => {
                    log::warn!("PDF export failed for {}: {e}", html_path.display());
                    None
                }
            }
        }
        _ => None,
    };

    Ok(ReportArtifacts {
        html_path,
        json_path,
        pdf_path,
    })
}

/// Prints the HTML file at `html_path` to an A4 PDF through a fresh context.
pub async fn export_pdf(
    renderer: Arc<dyn RenderingService>,
    html_path: &Path,
    pdf_path: &Path,
) -> Result<(), StageError> {
    let absolute = tokio::fs::canonicalize(html_path.to_path_buf()).await?;
    let file_url = Url::from_file_path(&absolute).map_err(|()| {
        RenderError::PageOperation {
            operation: "file_url",
            reason: format!("not an absolute path: {}", absolute.display()),
        }
    })?;

    let mut context = renderer.new_context(Viewport::desktop(), None).await?;
    let printed = async {
        context
            .navigate(file_url.as_str(), WaitStrategy::FullyLoaded, NAVIGATION_TIMEOUT)
            .await?;
        context.print_pdf().await
    }
    .await;
    context.close().await;

    tokio::fs::write(pdf_path.to_path_buf(), printed?).await?;
    Ok(())
}
