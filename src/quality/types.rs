use serde::Serialize;

/// Lighthouse category scores on a 0..=100 scale; `None` when not reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryScores {
    pub performance: Option<u8>,
    pub accessibility: Option<u8>,
    pub best_practices: Option<u8>,
    pub seo: Option<u8>,
}

/// Display strings of the Lighthouse lab metrics (e.g. `"1.2 s"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QualityMetrics {
    pub first_contentful_paint: Option<String>,
    pub largest_contentful_paint: Option<String>,
    pub cumulative_layout_shift: Option<String>,
    pub speed_index: Option<String>,
    pub total_blocking_time: Option<String>,
    pub time_to_interactive: Option<String>,
}

/// Output of the quality stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QualitySignals {
    pub scores: CategoryScores,
    pub metrics: QualityMetrics,
    pub error: Option<String>,
}
