//! CSS selector and regex helpers.

use regex::Regex;
use scraper::{ElementRef, Selector};

/// Parses a CSS selector that must succeed (for compile-time constants).
///
/// Use this only inside `LazyLock` initializers for static selectors, where a
/// parse failure is a programming error caught by the first test that touches it.
///
/// # Panics
///
/// Panics if the selector cannot be parsed.
pub fn parse_selector_unsafe(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        panic!(
            "Failed to parse CSS selector '{}' in {}: {}. This is a programming error.",
            selector_str, context, e
        )
    })
}

/// Compiles a regex that must succeed (for compile-time constants).
///
/// # Panics
///
/// Panics if the pattern does not compile.
pub fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

/// Returns an attribute value trimmed of surrounding whitespace, or `""` when absent.
pub fn trimmed_attr(element: &ElementRef<'_>, name: &str) -> String {
    element
        .value()
        .attr(name)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// Returns the concatenated text content of an element, trimmed.
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_parse_selector_unsafe_valid() {
        let selector = parse_selector_unsafe("a[href]", "test");
        let doc = Html::parse_fragment(r#"<a href="/x">x</a><a>y</a>"#);
        assert_eq!(doc.select(&selector).count(), 1);
    }

    #[test]
    #[should_panic(expected = "programming error")]
    fn test_parse_selector_unsafe_invalid_panics() {
        parse_selector_unsafe("a[", "test");
    }

    #[test]
    #[should_panic(expected = "programming error")]
    fn test_compile_regex_unsafe_invalid_panics() {
        compile_regex_unsafe("(unclosed", "test");
    }

    #[test]
    fn test_trimmed_attr_and_text() {
        let doc = Html::parse_fragment(r#"<img alt="  logo  "><p>  Hello <b>world</b> </p>"#);
        let img = doc
            .select(&parse_selector_unsafe("img", "test"))
            .next()
            .expect("img");
        assert_eq!(trimmed_attr(&img, "alt"), "logo");
        assert_eq!(trimmed_attr(&img, "src"), "");

        let p = doc
            .select(&parse_selector_unsafe("p", "test"))
            .next()
            .expect("p");
        assert_eq!(element_text(&p), "Hello world");
    }
}
