//! On-page analysis of rendered HTML.
//!
//! This module extracts SEO and accessibility signals from the DOM serialized
//! after rendering:
//! - Title, meta description, canonical, language and robots directives
//! - Heading outline and heading issues
//! - Image alt/dimension/lazy-loading statistics
//! - Open Graph, Twitter Card and hreflang tags
//! - Structured data types (JSON-LD, microdata)
//! - Visible word count and missing accessible names
//!
//! All parsing is done using CSS selectors via the `scraper` crate.

mod analyzer;
mod structured;
mod types;

pub use analyzer::analyze_page;
pub use structured::{extract_structured_data_types, UNKNOWN_TYPE};
pub use types::{
    AriaIssues, HeadingIssues, Headings, HreflangLink, ImageSample, ImageStats, OnPageSignals,
    OpenGraph, SocialTags, StructuredDataTypes, TwitterCard,
};

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
