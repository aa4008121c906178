//! Anchor extraction and href normalization.

use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use super::types::LinkRecord;
use crate::config::MAX_ANCHOR_TEXT_CHARS;
use crate::utils::{collapse_whitespace, parse_selector_unsafe, truncate_chars};

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("a[href]", "ANCHOR_SELECTOR"));

/// Resolves `href` against `base`.
///
/// Returns the raw (trimmed) href unchanged when there is no base or the join
/// fails; never errors.
pub fn normalize_href(href: &str, base: Option<&Url>) -> String {
    let href = href.trim();
    let resolved = match base {
        Some(base) => base.join(href),
        None => Url::parse(href),
    };
    resolved.map(String::from).unwrap_or_else(|_| href.to_string())
}

/// Extracts every `a[href]` in document order.
pub fn extract_links(html: &str, final_url: &Url) -> Vec<LinkRecord> {
    let document = Html::parse_document(html);
    let page_host = final_url.host_str();

    document
        .select(&ANCHOR_SELECTOR)
        .map(|el| {
            let raw_href = el.value().attr("href").unwrap_or_default();
            let href = normalize_href(raw_href, Some(final_url));

            let external = match Url::parse(&href) {
                Ok(resolved) => resolved.host_str() != page_host,
                Err(_) => false,
            };

            let rel = el.value().attr("rel").unwrap_or_default().to_lowercase();
            let has_rel = |token: &str| rel.split_whitespace().any(|t| t == token);

            let text = collapse_whitespace(&el.text().collect::<String>());
            LinkRecord {
                anchor_text: truncate_chars(&text, MAX_ANCHOR_TEXT_CHARS),
                external,
                nofollow: has_rel("nofollow"),
                ugc: has_rel("ugc"),
                sponsored: has_rel("sponsored"),
                noopener: has_rel("noopener"),
                href,
            }
        })
        .collect()
}

/// Whether the anchor text is a "click here" phrase.
pub fn is_click_here(anchor_text: &str) -> bool {
    let lower = anchor_text.to_lowercase();
    lower.contains("click here") || lower.contains("klicka här")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn base() -> Url {
        Url::parse("https://example.com/blog/post").expect("base")
    }

    #[test]
    fn test_normalize_relative_and_absolute() {
        assert_eq!(normalize_href("/about", Some(&base())), "https://example.com/about");
        assert_eq!(normalize_href("next", Some(&base())), "https://example.com/blog/next");
        assert_eq!(
            normalize_href(" https://other.org/x ", Some(&base())),
            "https://other.org/x"
        );
        assert_eq!(
            normalize_href("mailto:hej@example.com", Some(&base())),
            "mailto:hej@example.com"
        );
    }

    #[test]
    fn test_normalize_unparsable_keeps_raw() {
        assert_eq!(normalize_href("http://[::1", Some(&base())), "http://[::1");
        assert_eq!(normalize_href("/relative", None), "/relative");
    }

    #[test]
    fn test_extract_links_flags_and_text() {
        let html = r#"<body>
            <a href="/a">  Internal
               link </a>
            <a href="https://partner.org/" rel="Sponsored NoFollow noopener">Partner</a>
            <a href="https://ugc.org/" rel="ugc">Klicka HÄR för mer</a>
            <a name="no-href">skip</a>
            <a href="https://example.com/b"></a>
        </body>"#;
        let links = extract_links(html, &base());
        assert_eq!(links.len(), 4);

        assert_eq!(links[0].href, "https://example.com/a");
        assert_eq!(links[0].anchor_text, "Internal link");
        assert!(!links[0].external);

        assert!(links[1].external);
        assert!(links[1].sponsored && links[1].nofollow && links[1].noopener);
        assert!(!links[1].ugc);

        assert!(links[2].ugc);
        assert!(is_click_here(&links[2].anchor_text));

        assert!(!links[3].external);
        assert_eq!(links[3].anchor_text, "");
    }

    #[test]
    fn test_rel_flags_are_whole_tokens() {
        let html = r#"<a href="https://x.org/" rel="nofollowers">x</a>"#;
        let links = extract_links(html, &base());
        assert!(!links[0].nofollow);
    }

    #[test]
    fn test_anchor_text_truncated_to_140_chars() {
        let html = format!(r#"<a href="/long">{}</a>"#, "å".repeat(300));
        let links = extract_links(&html, &base());
        assert_eq!(links[0].anchor_text.chars().count(), 140);
    }

    #[test]
    fn test_unresolvable_href_is_internal_and_raw() {
        let html = r#"<a href="http://[bad">x</a>"#;
        let links = extract_links(html, &base());
        assert_eq!(links[0].href, "http://[bad");
        assert!(!links[0].external);
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(href in "[a-z0-9/._?=#-]{0,30}") {
            let once = normalize_href(&href, Some(&base()));
            let twice = normalize_href(&once, Some(&base()));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn normalization_never_panics(href in "\\PC{0,40}") {
            let _ = normalize_href(&href, Some(&base()));
        }

        #[test]
        fn absolute_serialized_urls_are_unchanged(path in "(/[a-z0-9]{1,8}){0,4}") {
            let absolute = format!("https://example.org{path}/");
            prop_assert_eq!(normalize_href(&absolute, Some(&base())), absolute);
        }
    }
}
