//! Link analysis types.

use serde::Serialize;

/// Whether a link points at the audited host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkClass {
    Internal,
    External,
}

/// An anchor extracted from the rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRecord {
    /// Absolute URL, or the raw href when it could not be resolved
    pub href: String,
    /// Whitespace-collapsed anchor text, at most 140 characters
    pub anchor_text: String,
    /// Resolved host differs from the page host
    pub external: bool,
    pub nofollow: bool,
    pub ugc: bool,
    pub sponsored: bool,
    pub noopener: bool,
}

impl LinkRecord {
    pub fn class(&self) -> LinkClass {
        if self.external {
            LinkClass::External
        } else {
            LinkClass::Internal
        }
    }
}

/// A sampled link that neither HEAD nor GET reached with a 2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkCheckResult {
    pub href: String,
    pub anchor_text: String,
    /// Last observed status, 0 when no response was received
    pub http_status: u16,
    pub link_class: LinkClass,
}

/// Link statistics and broken-link samples for one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkSignals {
    pub total: usize,
    pub internal: usize,
    pub external: usize,
    pub external_follow: usize,
    pub external_nofollow: usize,
    pub external_noopener: usize,
    pub external_ugc: usize,
    pub external_sponsored: usize,
    /// Anchors with no text
    pub empty_anchors: usize,
    /// Anchors saying "click here" (or the Swedish "klicka här")
    pub click_here_anchors: usize,
    pub top_internal_samples: Vec<LinkRecord>,
    pub top_external_samples: Vec<LinkRecord>,
    /// Broken links among the checked sample
    pub broken_total: usize,
    pub broken_samples: Vec<LinkCheckResult>,
    /// Set when link analysis could not run
    pub error: Option<String>,
}
