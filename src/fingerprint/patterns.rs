//! Pattern matching helpers for technology detection.

use super::signatures::{CompiledSignature, CDN_MARKERS, CMS_GENERATORS, CMS_MARKERS};

/// Labels of every signature with at least one pattern matching `lowered`.
///
/// `lowered` must already be lowercase; labels come out in table order.
pub(crate) fn matching_labels(table: &[CompiledSignature], lowered: &str) -> Vec<String> {
    table
        .iter()
        .filter(|signature| signature.patterns.iter().any(|re| re.is_match(lowered)))
        .map(|signature| signature.label.to_string())
        .collect()
}

/// CMS label from the generator meta (checked first) or markup markers.
pub(crate) fn detect_cms(lowered_html: &str, generator: &str) -> String {
    let generator = generator.to_lowercase();
    CMS_GENERATORS
        .iter()
        .find(|(needle, _)| generator.contains(needle))
        .or_else(|| {
            CMS_MARKERS
                .iter()
                .find(|(needle, _)| lowered_html.contains(needle))
        })
        .map(|(_, label)| label.to_string())
        .unwrap_or_default()
}

/// CDN labels whose marker appears in any asset URL.
pub(crate) fn detect_cdn(assets: &[String]) -> Vec<String> {
    CDN_MARKERS
        .iter()
        .filter(|(needle, _)| assets.iter().any(|asset| asset.contains(needle)))
        .map(|(_, label)| label.to_string())
        .collect()
}
