//! On-page signal types.

use serde::Serialize;

/// Heading texts by level, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub h4: Vec<String>,
    pub h5: Vec<String>,
    pub h6: Vec<String>,
}

impl Headings {
    /// Total headings across all levels.
    pub fn total(&self) -> usize {
        self.levels().iter().map(|(_, texts)| texts.len()).sum()
    }

    /// `(tag, texts)` pairs from h1 to h6.
    pub fn levels(&self) -> [(&'static str, &[String]); 6] {
        [
            ("h1", &self.h1),
            ("h2", &self.h2),
            ("h3", &self.h3),
            ("h4", &self.h4),
            ("h5", &self.h5),
            ("h6", &self.h6),
        ]
    }
}

/// An `<img>` element's relevant attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageSample {
    pub src: String,
    pub alt: String,
    /// Lower-cased `loading` attribute
    pub loading: String,
    pub width: String,
    pub height: String,
}

/// Image statistics over all `<img>` elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageStats {
    pub total: usize,
    /// Images whose trimmed `alt` is empty or absent
    pub missing_alt: usize,
    /// First missing-alt images
    pub missing_alt_samples: Vec<ImageSample>,
    /// `loading="lazy"`
    pub lazy: usize,
    /// Both `width` and `height` set
    pub with_dimensions: usize,
    /// `src` is a `data:` URI
    pub base64: usize,
    pub missing_dimensions: usize,
}

/// Open Graph tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub image: String,
    pub url: String,
    pub site_name: String,
}

impl OpenGraph {
    /// Whether any field is non-empty.
    pub fn any_present(&self) -> bool {
        [&self.title, &self.description, &self.image, &self.url, &self.site_name]
            .iter()
            .any(|v| !v.is_empty())
    }
}

/// Twitter Card tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub image: String,
}

/// Social sharing tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SocialTags {
    pub og: OpenGraph,
    pub twitter: TwitterCard,
}

/// An `hreflang` alternate link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HreflangLink {
    pub hreflang: String,
    pub href: String,
}

/// Heading structure problems.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeadingIssues {
    pub multiple_h1: bool,
    pub empty_h1: bool,
    pub empty_h2: bool,
}

/// Interactive elements without an accessible name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AriaIssues {
    /// Buttons without `aria-label`, `title` or text
    pub buttons_missing_label: usize,
    /// Inputs, textareas and selects without `aria-label`, `title`, `placeholder` or `name`
    pub inputs_missing_label: usize,
    /// Elements with `tabindex="-1"`
    pub tabindex_negative: usize,
}

/// Structured data types found in the markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuredDataTypes {
    /// JSON-LD `@type` values (arrays comma-joined)
    pub json_ld_types: Vec<String>,
    /// Microdata `itemtype` URLs
    pub microdata_types: Vec<String>,
}

/// On-page SEO and accessibility signals of a rendered document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OnPageSignals {
    pub title: String,
    /// Character count of the trimmed title
    pub title_length: usize,
    pub meta_description: String,
    /// Character count of the trimmed description
    pub meta_description_length: usize,
    pub canonical: String,
    /// `<html lang>`
    pub lang: String,
    pub robots_meta: String,
    pub googlebot_meta: String,
    /// `<meta http-equiv="X-Robots-Tag">`
    pub x_robots_tag: String,
    pub headings: Headings,
    pub images: ImageStats,
    pub social: SocialTags,
    pub hreflang: Vec<HreflangLink>,
    /// Whitespace-separated tokens of the visible body text
    pub word_count: usize,
    pub heading_issues: HeadingIssues,
    pub aria_issues: AriaIssues,
    pub structured_data: StructuredDataTypes,
}
