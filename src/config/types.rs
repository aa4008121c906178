//! Audit configuration and the log option enums shared with the CLI.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_USER_AGENT, HTTP_TIMEOUT_SECS, LINK_CHECK_TIMEOUT, NAVIGATION_TIMEOUT,
};

/// `--log-level` values.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// `--log-format` values.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Coloured, one line per record, for terminals
    Plain,
    /// One JSON object per line, for log shippers
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// The binary builds this from command-line flags; library users construct it
/// directly.
///
/// # Examples
///
/// ```no_run
/// use site_audit::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     output_dir: PathBuf::from("reports"),
///     skip_lighthouse: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for screenshots and report artifacts
    pub output_dir: PathBuf,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Navigation ceiling in seconds for each wait strategy
    pub navigation_timeout_seconds: u64,

    /// Timeout in seconds for plain HTTP fetches (robots.txt, sitemap, tech fetch)
    pub http_timeout_seconds: u64,

    /// Timeout in seconds for each link check request (HEAD and GET fallback)
    pub link_check_timeout_seconds: u64,

    /// HTTP User-Agent header value for plain HTTP fetches
    pub user_agent: String,

    /// Chrome/Chromium executable; auto-detected when `None`
    pub chrome_executable: Option<PathBuf>,

    /// Lighthouse CLI binary name or path
    pub lighthouse_bin: String,

    /// Skip the Lighthouse stage (category scores fall back to defaults)
    pub skip_lighthouse: bool,

    /// Print the HTML report to PDF after writing it
    pub export_pdf: bool,

    /// Base URL used to build public artifact links in API responses
    pub public_base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            navigation_timeout_seconds: NAVIGATION_TIMEOUT.as_secs(),
            http_timeout_seconds: HTTP_TIMEOUT_SECS,
            link_check_timeout_seconds: LINK_CHECK_TIMEOUT.as_secs(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chrome_executable: None,
            lighthouse_bin: "lighthouse".to_string(),
            skip_lighthouse: false,
            export_pdf: true,
            public_base_url: None,
        }
    }
}
