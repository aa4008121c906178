//! Sequences the audit stages for one URL.

use std::sync::Arc;

use strum::IntoEnumIterator;

use super::report_data::{ReportData, StageOutputs};
use crate::error_handling::{AuditError, DegradedStage, Stage};
use crate::fingerprint::TechFingerprinter;
use crate::http::HttpClient;
use crate::links::LinkChecker;
use crate::parse::analyze_page;
use crate::quality::{LighthouseService, QualitySignals};
use crate::render::RenderCollector;
use crate::site::SiteInspector;
use crate::utils::{sanitize_error_message, validate_and_normalize_url};

/// Runs render first, then on-page, links, site, tech and quality concurrently.
///
/// Only a failed render aborts the run; every later stage degrades to defaults.
pub struct AuditOrchestrator {
    collector: RenderCollector,
    links: LinkChecker,
    site: SiteInspector,
    tech: TechFingerprinter,
    lighthouse: Arc<dyn LighthouseService>,
}

impl AuditOrchestrator {
    pub fn new(
        collector: RenderCollector,
        client: Arc<dyn HttpClient>,
        lighthouse: Arc<dyn LighthouseService>,
    ) -> Self {
        Self {
            collector,
            links: LinkChecker::new(Arc::clone(&client)),
            site: SiteInspector::new(Arc::clone(&client)),
            tech: TechFingerprinter::new(client),
            lighthouse,
        }
    }

    /// Replaces the link checker (e.g. to change its timeout).
    pub fn with_link_checker(mut self, links: LinkChecker) -> Self {
        self.links = links;
        self
    }

    /// Audits `url` end to end.
    ///
    /// Input without a scheme is accepted and audited as `https://<input>`;
    /// see [`validate_and_normalize_url`].
    ///
    /// # Errors
    ///
    /// [`AuditError::InvalidTarget`] for a non-http(s) or malformed URL and
    /// [`AuditError::RenderFailure`] when the page could not be rendered.
    pub async fn run(&self, url: &str) -> Result<ReportData, AuditError> {
        let target = validate_and_normalize_url(url)?;
        log::info!("Starting audit of {target}");

        let render = self.collector.collect(target.as_str()).await?;
        let final_url = render.final_url.as_str();
        log::debug!("Rendered {final_url}, running analysis stages");

        let (onpage, links, site, tech, quality) = tokio::join!(
            async { analyze_page(&render.html) },
            self.links.analyze(&render.html, final_url),
            self.site.inspect(final_url, &render.response_headers),
            self.tech.detect(final_url),
            self.lighthouse.score(final_url),
        );

        let mut degraded = Vec::new();
        if let Some(reason) = &links.error {
            degraded.push(DegradedStage::record(Stage::Links, reason));
        }
        if let Some(reason) = &site.robots.error {
            degraded.push(DegradedStage::record(Stage::Site, reason));
        }
        if let Some(reason) = &tech.error {
            degraded.push(DegradedStage::record(Stage::Tech, reason));
        }
        let quality = quality.unwrap_or_else(|e| {
            let reason = sanitize_error_message(&e.to_string());
            degraded.push(DegradedStage::record(Stage::Quality, &reason));
            QualitySignals {
                error: Some(reason),
                ..Default::default()
            }
        });

        let report = ReportData::assemble(
            render,
            StageOutputs {
                onpage,
                links,
                site,
                tech,
                quality,
            },
            degraded,
        );

        log::info!(
            "Audit of {} finished: composite {} (on-page {}, links {}, performance {}, usability {}), {}/{} stages complete",
            report.final_url,
            report.scores.composite,
            report.scores.onpage,
            report.scores.links,
            report.scores.performance,
            report.scores.usability,
            report.complete_stages().len(),
            Stage::iter().count()
        );
        Ok(report)
    }
}
