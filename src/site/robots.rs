//! robots.txt directive parsing.
//!
//! Only the groups addressed to every agent (`*` or empty) are honoured.
//! Within such a group, `Disallow` rules and `Sitemap` URLs are collected;
//! every other directive is ignored.

/// Rules collected from the groups that apply to all agents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsRules {
    /// Normalized `Disallow` paths (always starting with `/`)
    pub disallows: Vec<String>,
    /// `Sitemap` URLs
    pub sitemaps: Vec<String>,
}

impl RobotsRules {
    /// Whether `path` may be crawled: false if any rule is `/` or a prefix of it.
    pub fn allows(&self, path: &str) -> bool {
        let path = normalize_path(path);
        !self
            .disallows
            .iter()
            .any(|rule| rule == "/" || path.starts_with(rule.as_str()))
    }
}

/// Parses robots.txt content line by line.
pub fn parse_robots(text: &str) -> RobotsRules {
    let mut rules = RobotsRules::default();
    let mut applies = false;

    for line in text.lines() {
        let line = line.split('#').next().unwrap_or_default().trim();
        let Some((directive, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match directive.trim().to_ascii_lowercase().as_str() {
            "user-agent" => applies = value == "*" || value.is_empty(),
            "disallow" if applies && !value.is_empty() => rules.disallows.push(normalize_path(value)),
            "sitemap" if applies && !value.is_empty() => rules.sitemaps.push(value.to_string()),
            _ => {}
        }
    }

    rules
}

fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
