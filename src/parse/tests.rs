// On-page analysis tests.

use super::*;

#[test]
fn test_analyze_page_empty_document_defaults() {
    let signals = analyze_page("");
    assert_eq!(signals.title, "");
    assert_eq!(signals.title_length, 0);
    assert_eq!(signals.meta_description_length, 0);
    assert_eq!(signals.canonical, "");
    assert_eq!(signals.headings.total(), 0);
    assert_eq!(signals.images.total, 0);
    assert_eq!(signals.word_count, 0);
    assert!(!signals.heading_issues.multiple_h1);
}

#[test]
fn test_title_and_description_lengths_are_trimmed_char_counts() {
    let html = r#"<html><head>
        <title>
            Räksmörgås &amp; kaffe
        </title>
        <meta name="description" content="  Åtta tecken  ">
    </head></html>"#;
    let signals = analyze_page(html);
    assert_eq!(signals.title, "Räksmörgås & kaffe");
    assert_eq!(signals.title_length, 18);
    assert_eq!(signals.meta_description, "Åtta tecken");
    assert_eq!(signals.meta_description_length, 11);
}

#[test]
fn test_meta_directives() {
    let html = r#"<html lang="sv-SE"><head>
        <link rel="canonical" href="https://example.com/page">
        <meta name="robots" content="noindex, follow">
        <meta name="googlebot" content="nosnippet">
        <meta http-equiv="x-robots-tag" content="noarchive">
    </head></html>"#;
    let signals = analyze_page(html);
    assert_eq!(signals.lang, "sv-SE");
    assert_eq!(signals.canonical, "https://example.com/page");
    assert_eq!(signals.robots_meta, "noindex, follow");
    assert_eq!(signals.googlebot_meta, "nosnippet");
    assert_eq!(signals.x_robots_tag, "noarchive");
}

#[test]
fn test_headings_and_issues() {
    let html = r#"<body>
        <h1>First</h1><h1> </h1>
        <h2>Section</h2><h2></h2>
        <h3>Sub</h3><h6>Deep</h6>
    </body>"#;
    let signals = analyze_page(html);
    assert_eq!(signals.headings.h1, vec!["First".to_string(), String::new()]);
    assert_eq!(signals.headings.total(), 6);
    assert!(signals.heading_issues.multiple_h1);
    assert!(signals.heading_issues.empty_h1);
    assert!(signals.heading_issues.empty_h2);
}

#[test]
fn test_image_statistics() {
    let html = r#"<body>
        <img src="/a.png" alt="A" width="10" height="10" loading="LAZY">
        <img src="/b.png" alt="   ">
        <img src="data:image/gif;base64,R0lGOD" width="1">
        <img src="/c.png" alt="C" height="20">
    </body>"#;
    let images = analyze_page(html).images;
    assert_eq!(images.total, 4);
    assert_eq!(images.missing_alt, 2);
    assert_eq!(images.missing_alt_samples.len(), 2);
    assert_eq!(images.missing_alt_samples[0].src, "/b.png");
    assert_eq!(images.lazy, 1);
    assert_eq!(images.with_dimensions, 1);
    assert_eq!(images.missing_dimensions, 3);
    assert_eq!(images.base64, 1);
}

#[test]
fn test_missing_alt_samples_capped() {
    let html: String = (0..30).map(|i| format!(r#"<img src="/{i}.png">"#)).collect();
    let images = analyze_page(&html).images;
    assert_eq!(images.missing_alt, 30);
    assert_eq!(images.missing_alt_samples.len(), 20);
}

#[test]
fn test_social_tags_and_hreflang() {
    let html = r#"<head>
        <meta property="og:title" content="OG Title">
        <meta property="og:site_name" content="Example">
        <meta name="twitter:card" content="summary_large_image">
        <link rel="alternate" hreflang="sv" href="https://example.com/sv/">
        <link rel="alternate" hreflang="en" href="">
        <link rel="alternate" hreflang=" " href="https://example.com/x/">
    </head>"#;
    let signals = analyze_page(html);
    assert_eq!(signals.social.og.title, "OG Title");
    assert_eq!(signals.social.og.site_name, "Example");
    assert_eq!(signals.social.og.image, "");
    assert!(signals.social.og.any_present());
    assert_eq!(signals.social.twitter.card, "summary_large_image");
    assert_eq!(
        signals.hreflang,
        vec![HreflangLink {
            hreflang: "sv".into(),
            href: "https://example.com/sv/".into()
        }]
    );
}

#[test]
fn test_open_graph_absent() {
    assert!(!analyze_page("<head></head>").social.og.any_present());
}

#[test]
fn test_word_count_ignores_scripts_and_collapses_whitespace() {
    let html = r#"<body>
        <p>One   two
        three</p>
        <script>var ignored = "four five";</script>
        <style>.x { color: red }</style>
        <div>four</div>
    </body>"#;
    assert_eq!(analyze_page(html).word_count, 4);
}

#[test]
fn test_aria_issues() {
    let html = r#"<body>
        <button></button>
        <button aria-label="Close"></button>
        <button title="Menu"></button>
        <button>Send</button>
        <input type="text">
        <input type="hidden">
        <input type="email" placeholder="E-mail">
        <textarea name="message"></textarea>
        <select></select>
        <div tabindex="-1"></div><a tabindex="0"></a>
    </body>"#;
    let aria = analyze_page(html).aria_issues;
    assert_eq!(aria.buttons_missing_label, 1);
    assert_eq!(aria.inputs_missing_label, 2);
    assert_eq!(aria.tabindex_negative, 1);
}

#[test]
fn test_json_ld_types_flattened_and_malformed_skipped() {
    let html = r#"<head>
        <script type="application/ld+json">{"@type": "Organization"}</script>
        <script type="application/ld+json">[{"@type": ["Product", "Offer"]}, {"name": "no type"}]</script>
        <script type="application/ld+json">{ this is not json </script>
    </head>"#;
    let data = analyze_page(html).structured_data;
    assert_eq!(
        data.json_ld_types,
        vec![
            "Organization".to_string(),
            "Product, Offer".to_string(),
            UNKNOWN_TYPE.to_string()
        ]
    );
}

#[test]
fn test_microdata_types() {
    let html = r#"<body>
        <div itemscope itemtype="https://schema.org/Person https://schema.org/Author"></div>
        <div itemtype="https://schema.org/Ignored"></div>
    </body>"#;
    let data = analyze_page(html).structured_data;
    assert_eq!(
        data.microdata_types,
        vec![
            "https://schema.org/Person".to_string(),
            "https://schema.org/Author".to_string()
        ]
    );
}
