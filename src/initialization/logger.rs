//! Logger setup: `env_logger` with a plain (coloured) or JSON line format.

use std::io::Write;

use colored::*;
use log::{Level, LevelFilter};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Dependencies whose logs are capped regardless of the requested level.
///
/// chromiumoxide reports every CDP message it cannot deserialize at error
/// level, which is routine with newer Chrome builds.
const DEPENDENCY_FILTERS: &[(&str, LevelFilter)] = &[
    ("html5ever", LevelFilter::Error),
    ("selectors", LevelFilter::Warn),
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
    ("chromiumoxide", LevelFilter::Off),
    ("tungstenite", LevelFilter::Warn),
    ("async_tungstenite", LevelFilter::Warn),
];

/// Initializes the global logger.
///
/// `RUST_LOG` is read first; `level` then overrides the default and the
/// crate's own target, so `--log-level` always wins for `site_audit` logs.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a global logger is already
/// installed.
///
/// # Examples
///
/// ```bash
/// # Use RUST_LOG for quick debugging (no CLI args needed)
/// RUST_LOG=debug site_audit audit https://example.com
///
/// # Machine-readable output for log shippers
/// site_audit serve --log-format json
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(matches!(format, LogFormat::Plain));

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (module, cap) in DEPENDENCY_FILTERS {
        builder.filter_module(module, (*cap).min(level));
    }
    builder.filter_module("site_audit", level);

    match format {
        LogFormat::Json => builder.format(|buf, record| {
            writeln!(
                buf,
                "{}",
                json_line(
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    &record.args().to_string()
                )
            )
        }),
        LogFormat::Plain => builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {} [{}] {}",
                level_emoji(record.level()),
                record.target().cyan(),
                colored_level(record.level()),
                record.args()
            )
        }),
    };

    // try_init: tests and the API server may initialize more than once
    builder.try_init().map_err(InitializationError::from)
}

/// One JSON object per record: `{"ts","level","target","msg"}`.
fn json_line(ts_millis: i64, level: Level, target: &str, message: &str) -> String {
    serde_json::json!({
        "ts": ts_millis,
        "level": level.as_str(),
        "target": target,
        "msg": message,
    })
    .to_string()
}

fn level_emoji(level: Level) -> &'static str {
    match level {
        Level::Error => "❌",
        Level::Warn => "⚠️",
        Level::Info => "✔️",
        Level::Debug => "🔍",
        Level::Trace => "🔬",
    }
}

fn colored_level(level: Level) -> ColoredString {
    let label = level.as_str();
    match level {
        Level::Error => label.red(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.purple(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_line_escapes_message() {
        let line = json_line(1_700_000_000_000, Level::Warn, "site_audit::links", "say \"hi\"\nnow");
        let value: serde_json::Value = serde_json::from_str(&line).expect("valid json");
        assert_eq!(value["ts"], 1_700_000_000_000_i64);
        assert_eq!(value["level"], "WARN");
        assert_eq!(value["target"], "site_audit::links");
        assert_eq!(value["msg"], "say \"hi\"\nnow");
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_chromiumoxide_is_silenced() {
        assert!(DEPENDENCY_FILTERS
            .iter()
            .any(|(m, cap)| *m == "chromiumoxide" && *cap == LevelFilter::Off));
    }

    #[test]
    fn test_level_emoji_distinct() {
        let all = [Level::Error, Level::Warn, Level::Info, Level::Debug, Level::Trace];
        let mut emojis: Vec<&str> = all.iter().map(|l| level_emoji(*l)).collect();
        emojis.dedup();
        assert_eq!(emojis.len(), all.len());
    }

    // env_logger installs one global logger per process, so every call after
    // the first returns LoggerError; the contract is "never panics".
    #[test]
    fn test_init_logger_repeated_calls_return_error_not_panic() {
        let _ = init_logger_with(LevelFilter::Debug, LogFormat::Plain);
        let second = init_logger_with(LevelFilter::Trace, LogFormat::Json);
        assert!(matches!(second, Err(InitializationError::LoggerError(_))));
    }
}
