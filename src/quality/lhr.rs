//! Lighthouse result (LHR) JSON parsing.

use std::collections::HashMap;

use serde::Deserialize;

use super::types::{CategoryScores, QualityMetrics, QualitySignals};
use crate::error_handling::StageError;

#[derive(Debug, Deserialize)]
struct Lhr {
    #[serde(default)]
    categories: HashMap<String, LhrCategory>,
    #[serde(default)]
    audits: HashMap<String, LhrAudit>,
    #[serde(default, rename = "runtimeError")]
    runtime_error: Option<LhrRuntimeError>,
}

#[derive(Debug, Deserialize)]
struct LhrCategory {
    score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct LhrAudit {
    #[serde(default, rename = "displayValue")]
    display_value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LhrRuntimeError {
    code: String,
    #[serde(default)]
    message: String,
}

/// Parses an LHR document into scores and display metrics.
///
/// A `runtimeError` reported by Lighthouse is surfaced as an error.
pub fn parse_lhr(json: &str) -> Result<QualitySignals, StageError> {
    let lhr: Lhr = serde_json::from_str(json)
        .map_err(|e| StageError::Lighthouse(format!("unreadable Lighthouse output: {e}")))?;

    if let Some(err) = lhr.runtime_error {
        return Err(StageError::Lighthouse(format!("{}: {}", err.code, err.message)));
    }

    let score = |key: &str| {
        lhr.categories
            .get(key)
            .and_then(|c| c.score)
            .map(to_percent)
    };
    let display = |key: &str| {
        lhr.audits
            .get(key)
            .and_then(|a| a.display_value.clone())
    };

    Ok(QualitySignals {
        scores: CategoryScores {
            performance: score("performance"),
            accessibility: score("accessibility"),
            best_practices: score("best-practices"),
            seo: score("seo"),
        },
        metrics: QualityMetrics {
            first_contentful_paint: display("first-contentful-paint"),
            largest_contentful_paint: display("largest-contentful-paint"),
            cumulative_layout_shift: display("cumulative-layout-shift"),
            speed_index: display("speed-index"),
            total_blocking_time: display("total-blocking-time"),
            time_to_interactive: display("interactive"),
        },
        error: None,
    })
}

fn to_percent(score: f64) -> u8 {
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}
