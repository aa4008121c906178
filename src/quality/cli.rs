//! Lighthouse run as a child process.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;

use super::lhr::parse_lhr;
use super::types::QualitySignals;
use super::LighthouseService;
use crate::config::LIGHTHOUSE_TIMEOUT;
use crate::error_handling::StageError;
use crate::utils::sanitize_error_message;

const CATEGORIES: &str = "performance,accessibility,best-practices,seo";
const CHROME_FLAGS: &str = "--headless=new --no-sandbox";

/// Runs the `lighthouse` CLI and parses its JSON report from stdout.
pub struct LighthouseCli {
    bin: String,
    chrome_path: Option<PathBuf>,
    timeout: Duration,
}

impl LighthouseCli {
    pub fn new(bin: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            chrome_path: None,
            timeout: LIGHTHOUSE_TIMEOUT,
        }
    }

    /// Chrome binary handed to Lighthouse through `CHROME_PATH`.
    pub fn with_chrome_path(mut self, path: Option<PathBuf>) -> Self {
        self.chrome_path = path;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self, url: &str) -> Command {
        let mut command = Command::new(&self.bin);
        command
            .arg(url)
            .arg("--output=json")
            .arg("--output-path=stdout")
            .arg("--quiet")
            .arg(format!("--only-categories={CATEGORIES}"))
            .arg(format!("--chrome-flags={CHROME_FLAGS}"))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(path) = &self.chrome_path {
            command.env("CHROME_PATH", path);
        }
        command
    }
}

#[async_trait]
impl LighthouseService for LighthouseCli {
    async fn score(&self, url: &str) -> Result<QualitySignals, StageError> {
        log::debug!("Running {} for {url}", self.bin);
        let start = Instant::now();

        let output = tokio::time::timeout(self.timeout, self.command(url).output())
            .await
            .map_err(|_| {
                StageError::Lighthouse(format!("timed out after {}s", self.timeout.as_secs()))
            })?
            .map_err(|e| StageError::Lighthouse(format!("failed to spawn {}: {e}", self.bin)))?;

        log::info!(
            "Lighthouse finished in {:.1}s with {}",
            start.elapsed().as_secs_f64(),
            output.status
        );

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => format!("exited with {}", output.status),
                text => sanitize_error_message(text),
            };
            return Err(StageError::Lighthouse(reason));
        }

        parse_lhr(&String::from_utf8_lossy(&output.stdout))
    }
}
