//! Technology fingerprinting from a fresh fetch of the page.

use std::sync::{Arc, LazyLock};

use scraper::{Html, Selector};

use super::patterns::{detect_cdn, detect_cms, matching_labels};
use super::signatures::{
    COMPILED_ANALYTICS, COMPILED_FRAMEWORKS, COMPILED_UI_LIBRARIES, SIGNATURES_VERSION,
};
use super::types::TechSignals;
use crate::config::{HEADER_SERVER, HEADER_X_POWERED_BY, MAX_ASSET_SAMPLES};
use crate::http::{FetchOptions, Headers, HttpClient};
use crate::site::SecurityHeaders;
use crate::utils::{parse_selector_unsafe, sanitize_error_message, trimmed_attr};

static GENERATOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(r#"meta[name="generator"]"#, "GENERATOR_SELECTOR"));
static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("script[src]", "SCRIPT_SELECTOR"));
static STYLESHEET_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_unsafe(r#"link[rel="stylesheet"][href]"#, "STYLESHEET_SELECTOR")
});

/// Identifies CMS, frameworks, UI libraries, analytics and CDNs.
///
/// Works on its own GET of the page rather than the rendered DOM, so the
/// result reflects what the server sends.
pub struct TechFingerprinter {
    client: Arc<dyn HttpClient>,
}

impl TechFingerprinter {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }

    /// Fetches `url` (following redirects) and fingerprints the response.
    ///
    /// A transport failure yields an otherwise empty result with `error` set.
    pub async fn detect(&self, url: &str) -> TechSignals {
        match self.client.fetch(url, &FetchOptions::get()).await {
            Ok(response) => {
                log::debug!("Tech fetch of {} answered {}", response.url, response.status);
                fingerprint(&response.text(), &response.headers)
            }
            Err(e) => {
                log::warn!("Tech fetch failed for {url}: {e}");
                TechSignals {
                    signatures_version: SIGNATURES_VERSION.to_string(),
                    error: Some(sanitize_error_message(&e.to_string())),
                    ..Default::default()
                }
            }
        }
    }
}

/// Fingerprints a response body and its (lowercase-keyed) headers.
pub fn fingerprint(body: &str, headers: &Headers) -> TechSignals {
    let document = Html::parse_document(body);
    let lowered = body.to_lowercase();

    let generator = document
        .select(&GENERATOR_SELECTOR)
        .next()
        .map(|el| trimmed_attr(&el, "content"))
        .unwrap_or_default();
    let scripts = collect_attr(&document, &SCRIPT_SELECTOR, "src");
    let stylesheets = collect_attr(&document, &STYLESHEET_SELECTOR, "href");

    let cms = detect_cms(&lowered, &generator);
    let frameworks = matching_labels(&COMPILED_FRAMEWORKS, &lowered);
    let ui_libraries = matching_labels(&COMPILED_UI_LIBRARIES, &lowered);
    let analytics = matching_labels(&COMPILED_ANALYTICS, &lowered);

    let assets: Vec<String> = scripts.iter().chain(stylesheets.iter()).cloned().collect();
    let cdn = detect_cdn(&assets);

    let mut detected: Vec<String> = Vec::new();
    for label in std::iter::once(&cms)
        .chain(&frameworks)
        .chain(&ui_libraries)
        .chain(&analytics)
    {
        if !label.is_empty() && !detected.contains(label) {
            detected.push(label.clone());
        }
    }

    let header = |name: &str| headers.get(name).cloned().unwrap_or_default();

    TechSignals {
        server: header(HEADER_SERVER),
        powered_by: header(HEADER_X_POWERED_BY),
        cms,
        frameworks,
        ui_libraries,
        analytics,
        cdn,
        scripts,
        stylesheets,
        detected,
        security_headers: SecurityHeaders::from_headers(headers),
        signatures_version: SIGNATURES_VERSION.to_string(),
        error: None,
    }
}

fn collect_attr(document: &Html, selector: &Selector, attr: &str) -> Vec<String> {
    document
        .select(selector)
        .map(|el| trimmed_attr(&el, attr))
        .filter(|value| !value.is_empty())
        .take(MAX_ASSET_SAMPLES)
        .collect()
}
