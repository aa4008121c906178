// Technology fingerprinting tests.

use std::collections::BTreeMap;

use httptest::{matchers::*, responders::*, Expectation, Server};

use super::patterns::{detect_cdn, detect_cms};
use super::*;
use crate::config::Config;
use crate::http::Headers;
use crate::initialization::init_http_client;

fn headers(pairs: &[(&str, &str)]) -> Headers {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_generator_meta_wins_over_markup() {
    let html = r#"<html><head><meta name="generator" content="Joomla! 4.2"></head>
        <body><img src="/wp-content/uploads/a.png"></body></html>"#;
    let signals = fingerprint(html, &BTreeMap::new());
    assert_eq!(signals.cms, "Joomla");
}

#[test]
fn test_cms_marker_precedence() {
    assert_eq!(detect_cms("<link href=/wp-content/x.css>", ""), "WordPress");
    assert_eq!(detect_cms("<script src=//cdn.shopify.com/s.js>", ""), "Shopify");
    assert_eq!(detect_cms("drupal.settings = {}", ""), "Drupal");
    assert_eq!(detect_cms("<link rel=https://api.w.org/ href=/wp-json/>", ""), "WordPress");
    assert_eq!(detect_cms("<p>plain</p>", ""), "");
    assert_eq!(detect_cms("", "WordPress 6.4"), "WordPress");
}

#[test]
fn test_frameworks_ui_and_analytics() {
    let html = r#"<html><head>
        <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5/dist/css/bootstrap.min.css">
        <script src="https://www.googletagmanager.com/gtag/js?id=G-1"></script>
        <script src="https://plausible.io/js/script.js"></script>
        </head><body><div id="__next"></div>
        <script id="__NEXT_DATA__" type="application/json">{}</script>
        <div id="root"></div></body></html>"#;
    let signals = fingerprint(html, &BTreeMap::new());

    assert_eq!(signals.frameworks, vec!["Next.js", "React"]);
    assert_eq!(signals.ui_libraries, vec!["Bootstrap"]);
    assert_eq!(signals.analytics, vec!["Google Analytics / GTM", "Plausible"]);
    assert_eq!(signals.cms, "");
    assert_eq!(
        signals.detected,
        vec!["Next.js", "React", "Bootstrap", "Google Analytics / GTM", "Plausible"]
    );
}

#[test]
fn test_vue_scoped_attribute() {
    let signals = fingerprint(r#"<div data-v-1a2b3c class="x">hi</div>"#, &BTreeMap::new());
    assert_eq!(signals.frameworks, vec!["Vue.js"]);
}

#[test]
fn test_detected_has_no_duplicates() {
    let html = r#"<meta name="generator" content="WordPress 6">
        <link rel="stylesheet" href="/wp-content/themes/t/tailwind.css">"#;
    let signals = fingerprint(html, &BTreeMap::new());
    assert_eq!(signals.cms, "WordPress");
    assert_eq!(signals.detected, vec!["WordPress", "Tailwind CSS"]);
    let mut deduped = signals.detected.clone();
    deduped.dedup();
    assert_eq!(deduped.len(), signals.detected.len());
}

#[test]
fn test_assets_capped_and_cdn_detected() {
    let mut html = String::from(
        r#"<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.0/all.css">"#,
    );
    for i in 0..40 {
        html.push_str(&format!(r#"<script src="/js/{i}.js"></script>"#));
    }
    html.push_str(r#"<script src=""></script>"#);
    let signals = fingerprint(&html, &BTreeMap::new());

    assert_eq!(signals.scripts.len(), 25);
    assert_eq!(signals.scripts[0], "/js/0.js");
    assert_eq!(signals.stylesheets.len(), 1);
    assert_eq!(signals.cdn, vec!["Cloudflare"]);
    assert_eq!(signals.ui_libraries, vec!["Font Awesome"]);
}

#[test]
fn test_detect_cdn_markers() {
    let assets = vec![
        "https://maxcdn.stackpath.com/bootstrap.css".to_string(),
        "https://ajax.cloudflare.com/x.js".to_string(),
    ];
    assert_eq!(detect_cdn(&assets), vec!["Cloudflare", "StackPath / CDN"]);
    assert!(detect_cdn(&[]).is_empty());
}

#[test]
fn test_headers_reported() {
    let h = headers(&[
        ("server", "nginx"),
        ("x-powered-by", "PHP/8.2"),
        ("feature-policy", "camera 'none'"),
    ]);
    let signals = fingerprint("<html></html>", &h);
    assert_eq!(signals.server, "nginx");
    assert_eq!(signals.powered_by, "PHP/8.2");
    assert_eq!(signals.security_headers.permissions_policy, "camera 'none'");
    assert_eq!(signals.signatures_version, SIGNATURES_VERSION);
    assert!(signals.error.is_none());
}

#[tokio::test]
async fn test_detect_fetches_page() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/")).respond_with(
            status_code(200)
                .insert_header("Server", "cloudflare")
                .insert_header("Strict-Transport-Security", "max-age=600")
                .body(r#"<html><head><meta name="generator" content="Drupal 10"></head></html>"#),
        ),
    );
    let client = init_http_client(&Config::default()).expect("client");
    let signals = TechFingerprinter::new(client)
        .detect(&server.url("/").to_string())
        .await;

    assert_eq!(signals.cms, "Drupal");
    assert_eq!(signals.server, "cloudflare");
    assert_eq!(signals.security_headers.strict_transport_security, "max-age=600");
    assert_eq!(signals.detected, vec!["Drupal"]);
}

#[tokio::test]
async fn test_detect_transport_failure_sets_error() {
    let client = init_http_client(&Config::default()).expect("client");
    let signals = TechFingerprinter::new(client)
        .detect("http://127.0.0.1:9/")
        .await;

    assert!(signals.error.is_some());
    assert!(signals.detected.is_empty());
    assert_eq!(signals.signatures_version, SIGNATURES_VERSION);
}
