//! Public links to generated artifacts.

use std::sync::LazyLock;

use regex::Regex;

use crate::utils::compile_regex_unsafe;

static DUPLICATE_SLASHES: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"([^:]/)/+", "DUPLICATE_SLASHES"));

/// Base URL for artifact links: the configured public URL, else `https://<host>`.
pub fn public_base_url(configured: Option<&str>, host: Option<&str>) -> String {
    match (configured, host) {
        (Some(base), _) if !base.trim().is_empty() => base.trim().trim_end_matches('/').to_string(),
        (_, Some(host)) if !host.is_empty() => format!("https://{host}"),
        _ => String::new(),
    }
}

/// `<base>/output/<file>` with duplicate slashes collapsed (scheme `//` kept).
pub fn artifact_url(base: &str, file_name: &str) -> String {
    let joined = format!("{base}/output/{file_name}");
    DUPLICATE_SLASHES.replace_all(&joined, "$1").into_owned()
}
