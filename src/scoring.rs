//! Category and composite scores.
//!
//! All thresholds are fixed constants from [`crate::config`]. Every category is
//! rounded and clamped to `0..=100`; the composite is the rounded mean of
//! on-page, links, performance and usability (social is reported only).

use serde::Serialize;

use crate::config::{
    DEFAULT_CATEGORY_SCORE, DESCRIPTION_LENGTH_RANGE, HEADING_COUNT_THRESHOLD,
    LINK_VOLUME_MAX_POINTS, LINK_VOLUME_SATURATION, TITLE_LENGTH_RANGE,
};
use crate::fingerprint::TechSignals;
use crate::links::LinkSignals;
use crate::parse::OnPageSignals;
use crate::quality::CategoryScores;

/// Scores shown at the top of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scores {
    pub onpage: u8,
    pub links: u8,
    pub performance: u8,
    pub usability: u8,
    pub social: u8,
    pub composite: u8,
}

/// The facts scoring depends on, flattened out of the stage signals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreInputs {
    pub title_length: usize,
    pub description_length: usize,
    pub has_canonical: bool,
    pub has_lang: bool,
    pub missing_alt: usize,
    pub heading_count: usize,
    pub total_links: usize,
    pub internal_links: usize,
    pub external_links: usize,
    pub has_open_graph: bool,
    pub has_analytics: bool,
    pub lighthouse: CategoryScores,
}

impl ScoreInputs {
    pub fn from_signals(
        onpage: &OnPageSignals,
        links: &LinkSignals,
        tech: &TechSignals,
        lighthouse: CategoryScores,
    ) -> Self {
        Self {
            title_length: onpage.title_length,
            description_length: onpage.meta_description_length,
            has_canonical: !onpage.canonical.is_empty(),
            has_lang: !onpage.lang.is_empty(),
            missing_alt: onpage.images.missing_alt,
            heading_count: onpage.headings.total(),
            total_links: links.total,
            internal_links: links.internal,
            external_links: links.external,
            has_open_graph: onpage.social.og.any_present(),
            has_analytics: !tech.analytics.is_empty(),
            lighthouse,
        }
    }
}

/// Computes all category scores and the composite.
pub fn compute_scores(inputs: &ScoreInputs) -> Scores {
    let onpage = onpage_score(inputs);
    let links = links_score(inputs);
    let performance = clamp_score(category_or_default(inputs.lighthouse.performance));
    let usability = clamp_score(category_or_default(inputs.lighthouse.accessibility));
    let social = clamp_score(
        if inputs.has_open_graph { 50.0 } else { 10.0 }
            + if inputs.has_analytics { 50.0 } else { 10.0 },
    );

    let mean = (f64::from(onpage) + f64::from(links) + f64::from(performance) + f64::from(usability))
        / 4.0;

    Scores {
        onpage,
        links,
        performance,
        usability,
        social,
        composite: clamp_score(mean),
    }
}

fn onpage_score(inputs: &ScoreInputs) -> u8 {
    let points = |hit: bool, full: f64| if hit { full } else { 5.0 };
    let sum = points(TITLE_LENGTH_RANGE.contains(&inputs.title_length), 20.0)
        + points(DESCRIPTION_LENGTH_RANGE.contains(&inputs.description_length), 20.0)
        + points(inputs.has_canonical, 15.0)
        + points(inputs.has_lang, 10.0)
        + points(inputs.missing_alt == 0, 15.0)
        + points(inputs.heading_count > HEADING_COUNT_THRESHOLD, 10.0)
        + category_or_default(inputs.lighthouse.seo) / 10.0;
    clamp_score(sum)
}

fn links_score(inputs: &ScoreInputs) -> u8 {
    let volume = (inputs.total_links as f64 / LINK_VOLUME_SATURATION * LINK_VOLUME_MAX_POINTS)
        .min(LINK_VOLUME_MAX_POINTS);
    let internal = if inputs.internal_links > 0 { 15.0 } else { 5.0 };
    let external = if inputs.external_links > 0 { 10.0 } else { 5.0 };
    clamp_score(volume + internal + external)
}

fn category_or_default(score: Option<u8>) -> f64 {
    f64::from(score.unwrap_or(DEFAULT_CATEGORY_SCORE))
}

fn clamp_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
