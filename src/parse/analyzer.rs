//! Document-level extraction: meta tags, headings, images, social tags, text.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use super::structured::extract_structured_data_types;
use super::types::{
    AriaIssues, HeadingIssues, Headings, HreflangLink, ImageSample, ImageStats, OnPageSignals,
    OpenGraph, SocialTags, TwitterCard,
};
use crate::config::MAX_MISSING_ALT_SAMPLES;
use crate::utils::{collapse_whitespace, element_text, parse_selector_unsafe, trimmed_attr};

macro_rules! selector {
    ($name:ident, $css:expr) => {
        static $name: LazyLock<Selector> =
            LazyLock::new(|| parse_selector_unsafe($css, stringify!($name)));
    };
}

selector!(TITLE_SELECTOR, "title");
selector!(META_DESCRIPTION_SELECTOR, r#"meta[name="description"]"#);
selector!(CANONICAL_SELECTOR, r#"link[rel="canonical"]"#);
selector!(HTML_SELECTOR, "html");
selector!(BODY_SELECTOR, "body");
selector!(ROBOTS_META_SELECTOR, r#"meta[name="robots"]"#);
selector!(GOOGLEBOT_META_SELECTOR, r#"meta[name="googlebot"]"#);
selector!(HTTP_EQUIV_SELECTOR, "meta[http-equiv]");
selector!(META_SELECTOR, "meta");
selector!(H1_SELECTOR, "h1");
selector!(H2_SELECTOR, "h2");
selector!(H3_SELECTOR, "h3");
selector!(H4_SELECTOR, "h4");
selector!(H5_SELECTOR, "h5");
selector!(H6_SELECTOR, "h6");
selector!(IMG_SELECTOR, "img");
selector!(HREFLANG_SELECTOR, r#"link[rel="alternate"][hreflang]"#);
selector!(BUTTON_SELECTOR, "button");
selector!(
    FORM_CONTROL_SELECTOR,
    r#"input:not([type="hidden"]), textarea, select"#
);
selector!(NEGATIVE_TABINDEX_SELECTOR, r#"[tabindex="-1"]"#);

/// Elements whose text is never rendered.
const NON_VISIBLE_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Analyzes rendered HTML for on-page SEO and accessibility signals.
///
/// Pure and infallible: anything missing is reported as an empty string, zero
/// or `false`.
pub fn analyze_page(html: &str) -> OnPageSignals {
    let document = Html::parse_document(html);

    let title = first_text(&document, &TITLE_SELECTOR);
    let meta_description = first_attr(&document, &META_DESCRIPTION_SELECTOR, "content");
    let headings = extract_headings(&document);
    let images = extract_images(&document);

    let x_robots_tag = document
        .select(&HTTP_EQUIV_SELECTOR)
        .find(|el| {
            el.value()
                .attr("http-equiv")
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("x-robots-tag"))
        })
        .map(|el| trimmed_attr(&el, "content"))
        .unwrap_or_default();

    let heading_issues = HeadingIssues {
        multiple_h1: headings.h1.len() > 1,
        empty_h1: headings.h1.iter().any(String::is_empty),
        empty_h2: headings.h2.iter().any(String::is_empty),
    };

    let signals = OnPageSignals {
        title_length: title.chars().count(),
        title,
        meta_description_length: meta_description.chars().count(),
        meta_description,
        canonical: first_attr(&document, &CANONICAL_SELECTOR, "href"),
        lang: first_attr(&document, &HTML_SELECTOR, "lang"),
        robots_meta: first_attr(&document, &ROBOTS_META_SELECTOR, "content"),
        googlebot_meta: first_attr(&document, &GOOGLEBOT_META_SELECTOR, "content"),
        x_robots_tag,
        heading_issues,
        headings,
        images,
        social: extract_social(&document),
        hreflang: extract_hreflang(&document),
        word_count: count_words(&document),
        aria_issues: extract_aria_issues(&document),
        structured_data: extract_structured_data_types(&document),
    };

    log::debug!(
        "On-page: title {} chars, description {} chars, {} headings, {} images ({} missing alt)",
        signals.title_length,
        signals.meta_description_length,
        signals.headings.total(),
        signals.images.total,
        signals.images.missing_alt
    );
    signals
}

fn first_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .map(|el| element_text(&el))
        .unwrap_or_default()
}

fn first_attr(document: &Html, selector: &Selector, attr: &str) -> String {
    document
        .select(selector)
        .next()
        .map(|el| trimmed_attr(&el, attr))
        .unwrap_or_default()
}

fn all_texts(document: &Html, selector: &Selector) -> Vec<String> {
    document.select(selector).map(|el| element_text(&el)).collect()
}

fn extract_headings(document: &Html) -> Headings {
    Headings {
        h1: all_texts(document, &H1_SELECTOR),
        h2: all_texts(document, &H2_SELECTOR),
        h3: all_texts(document, &H3_SELECTOR),
        h4: all_texts(document, &H4_SELECTOR),
        h5: all_texts(document, &H5_SELECTOR),
        h6: all_texts(document, &H6_SELECTOR),
    }
}

fn extract_images(document: &Html) -> ImageStats {
    let images: Vec<ImageSample> = document
        .select(&IMG_SELECTOR)
        .map(|el| ImageSample {
            src: trimmed_attr(&el, "src"),
            alt: trimmed_attr(&el, "alt"),
            loading: trimmed_attr(&el, "loading").to_lowercase(),
            width: trimmed_attr(&el, "width"),
            height: trimmed_attr(&el, "height"),
        })
        .collect();

    let has_dimensions = |img: &ImageSample| !img.width.is_empty() && !img.height.is_empty();
    let missing_alt: Vec<&ImageSample> = images.iter().filter(|img| img.alt.is_empty()).collect();
    let with_dimensions = images.iter().filter(|img| has_dimensions(img)).count();

    ImageStats {
        total: images.len(),
        missing_alt: missing_alt.len(),
        missing_alt_samples: missing_alt
            .into_iter()
            .take(MAX_MISSING_ALT_SAMPLES)
            .cloned()
            .collect(),
        lazy: images.iter().filter(|img| img.loading == "lazy").count(),
        with_dimensions,
        base64: images.iter().filter(|img| img.src.starts_with("data:")).count(),
        missing_dimensions: images.len() - with_dimensions,
    }
}

fn meta_content(document: &Html, attr: &str, key: &str) -> String {
    document
        .select(&META_SELECTOR)
        .find(|el| el.value().attr(attr) == Some(key))
        .map(|el| trimmed_attr(&el, "content"))
        .unwrap_or_default()
}

fn extract_social(document: &Html) -> SocialTags {
    let og = |key: &str| meta_content(document, "property", key);
    let twitter = |key: &str| meta_content(document, "name", key);
    SocialTags {
        og: OpenGraph {
            title: og("og:title"),
            description: og("og:description"),
            image: og("og:image"),
            url: og("og:url"),
            site_name: og("og:site_name"),
        },
        twitter: TwitterCard {
            card: twitter("twitter:card"),
            title: twitter("twitter:title"),
            description: twitter("twitter:description"),
            image: twitter("twitter:image"),
        },
    }
}

fn extract_hreflang(document: &Html) -> Vec<HreflangLink> {
    document
        .select(&HREFLANG_SELECTOR)
        .map(|el| HreflangLink {
            hreflang: trimmed_attr(&el, "hreflang"),
            href: trimmed_attr(&el, "href"),
        })
        .filter(|link| !link.hreflang.is_empty() && !link.href.is_empty())
        .collect()
}

fn count_words(document: &Html) -> usize {
    let root = document
        .select(&BODY_SELECTOR)
        .next()
        .unwrap_or_else(|| document.root_element());

    let text: String = root
        .descendants()
        .filter(|node| {
            !node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| NON_VISIBLE_ELEMENTS.contains(&el.name()))
            })
        })
        .filter_map(|node| node.value().as_text().map(|t| String::from(&**t)))
        .collect::<Vec<_>>()
        .join(" ");

    let collapsed = collapse_whitespace(&text);
    if collapsed.is_empty() {
        0
    } else {
        collapsed.split(' ').count()
    }
}

fn has_any_attr(el: &ElementRef<'_>, names: &[&str]) -> bool {
    names.iter().any(|name| !trimmed_attr(el, name).is_empty())
}

fn extract_aria_issues(document: &Html) -> AriaIssues {
    AriaIssues {
        buttons_missing_label: document
            .select(&BUTTON_SELECTOR)
            .filter(|el| !has_any_attr(el, &["aria-label", "title"]) && element_text(el).is_empty())
            .count(),
        inputs_missing_label: document
            .select(&FORM_CONTROL_SELECTOR)
            .filter(|el| !has_any_attr(el, &["aria-label", "title", "placeholder", "name"]))
            .count(),
        tabindex_negative: document.select(&NEGATIVE_TABINDEX_SELECTOR).count(),
    }
}
