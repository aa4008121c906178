//! Structured data type extraction (JSON-LD and microdata).

use scraper::{Html, Selector};
use std::sync::LazyLock;

use super::types::StructuredDataTypes;
use crate::utils::{element_text, parse_selector_unsafe};

/// Label for JSON-LD nodes without a usable `@type`.
pub const UNKNOWN_TYPE: &str = "Unknown";

static JSON_LD_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_unsafe(r#"script[type="application/ld+json"]"#, "JSON_LD_SELECTOR")
});
static MICRODATA_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("[itemscope][itemtype]", "MICRODATA_SELECTOR"));

/// Collects JSON-LD `@type`s and microdata `itemtype`s.
///
/// Malformed JSON-LD blocks are skipped. A top-level array contributes one type
/// per element; `@type` arrays are joined with `", "`.
pub fn extract_structured_data_types(document: &Html) -> StructuredDataTypes {
    let mut json_ld_types = Vec::new();
    for script in document.select(&JSON_LD_SELECTOR) {
        let content = element_text(&script);
        let parsed: serde_json::Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("Skipping malformed JSON-LD block: {}", e);
                continue;
            }
        };
        let nodes = match parsed {
            serde_json::Value::Array(items) => items,
            other => vec![other],
        };
        json_ld_types.extend(nodes.iter().filter_map(json_ld_type));
    }

    let microdata_types = document
        .select(&MICRODATA_SELECTOR)
        .filter_map(|el| el.value().attr("itemtype"))
        .flat_map(|types| types.split_whitespace().map(str::to_string).collect::<Vec<_>>())
        .collect();

    StructuredDataTypes {
        json_ld_types,
        microdata_types,
    }
}

fn json_ld_type(node: &serde_json::Value) -> Option<String> {
    match node.get("@type") {
        Some(serde_json::Value::Array(types)) => {
            let joined = types
                .iter()
                .map(|t| match t {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            (!joined.is_empty()).then_some(joined)
        }
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => Some(UNKNOWN_TYPE.to_string()),
    }
}
