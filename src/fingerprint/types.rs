use serde::Serialize;

use crate::site::SecurityHeaders;

/// Technology stack observed from an independent fetch of the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TechSignals {
    /// `Server` response header
    pub server: String,
    /// `X-Powered-By` response header
    pub powered_by: String,
    /// CMS label, empty when none matched
    pub cms: String,
    pub frameworks: Vec<String>,
    pub ui_libraries: Vec<String>,
    pub analytics: Vec<String>,
    pub cdn: Vec<String>,
    /// First `script[src]` values
    pub scripts: Vec<String>,
    /// First stylesheet hrefs
    pub stylesheets: Vec<String>,
    /// Union of CMS, frameworks, UI libraries and analytics (first-seen order)
    pub detected: Vec<String>,
    pub security_headers: SecurityHeaders,
    pub signatures_version: String,
    pub error: Option<String>,
}
