//! The assembled result of one audit run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::error_handling::{DegradedStage, Stage};
use crate::fingerprint::TechSignals;
use crate::http::Headers;
use crate::links::LinkSignals;
use crate::parse::OnPageSignals;
use crate::quality::QualitySignals;
use crate::render::{
    NavigationTimings, RedirectHop, RenderResult, ResourceEvent, ResourceSummary, ScreenshotRefs,
};
use crate::scoring::{compute_scores, ScoreInputs, Scores};
use crate::site::SiteSignals;

/// Outputs of the five stages that run after rendering.
#[derive(Debug, Clone, Default)]
pub struct StageOutputs {
    pub onpage: OnPageSignals,
    pub links: LinkSignals,
    pub site: SiteSignals,
    pub tech: TechSignals,
    pub quality: QualitySignals,
}

/// Everything known about an audited page, scored.
///
/// Built once by [`ReportData::assemble`] and only read afterwards.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct ReportData {
    pub generated_at: DateTime<Utc>,
    /// Normalized target URL
    pub requested_url: String,
    pub final_url: String,
    pub title: String,
    pub http_status: Option<u16>,
    pub response_headers: Headers,
    pub redirect_chain: Vec<RedirectHop>,
    pub timings: NavigationTimings,
    pub resources: Vec<ResourceEvent>,
    pub resource_summary: ResourceSummary,
    pub screenshots: ScreenshotRefs,
    pub onpage: OnPageSignals,
    pub links: LinkSignals,
    pub site: SiteSignals,
    pub tech: TechSignals,
    pub quality: QualitySignals,
    pub scores: Scores,
    /// Stages that fell back to defaults, in the order they were noticed
    pub degraded_stages: Vec<DegradedStage>,
}

impl ReportData {
    /// Merges the render result and stage outputs and computes the scores.
    pub fn assemble(
        render: RenderResult,
        stages: StageOutputs,
        mut degraded_stages: Vec<DegradedStage>,
    ) -> Self {
        let scores = compute_scores(&ScoreInputs::from_signals(
            &stages.onpage,
            &stages.links,
            &stages.tech,
            stages.quality.scores,
        ));

        let mut degraded = render.degraded;
        degraded.append(&mut degraded_stages);

        Self {
            generated_at: Utc::now(),
            requested_url: render.requested_url,
            final_url: render.final_url,
            title: render.title,
            http_status: render.http_status,
            response_headers: render.response_headers,
            redirect_chain: render.redirect_chain,
            timings: render.timings,
            resources: render.resources,
            resource_summary: render.summary,
            screenshots: render.screenshots,
            onpage: stages.onpage,
            links: stages.links,
            site: stages.site,
            tech: stages.tech,
            quality: stages.quality,
            scores,
            degraded_stages: degraded,
        }
    }

    /// Stages that produced real data, in pipeline order.
    pub fn complete_stages(&self) -> Vec<Stage> {
        Stage::iter()
            .filter(|stage| self.degraded_stages.iter().all(|d| d.stage != *stage))
            .collect()
    }

    /// Millisecond timestamp used to name this report's artifacts.
    pub fn artifact_stamp(&self) -> i64 {
        self.generated_at.timestamp_millis()
    }
}
