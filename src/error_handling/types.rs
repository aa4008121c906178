//! Error type definitions.
//!
//! This module defines the error taxonomy of an audit run:
//! - [`AuditError`]: the only error that reaches the caller of the orchestrator
//! - [`StageError`]: stage-local failures, converted into defaults at the stage boundary
//! - [`HttpError`], [`RenderError`]: failures of the external capabilities
//! - [`InitializationError`]: setup failures (logger, HTTP client, browser)

use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error launching or configuring the headless browser.
    #[error("Browser initialization error: {0}")]
    BrowserError(String),
}

/// Fatal audit errors.
///
/// Everything except a failed render degrades to defaults inside the report, so
/// this is the complete set of errors a caller of `AuditOrchestrator::run` sees.
#[derive(Error, Debug)]
pub enum AuditError {
    /// The requested URL is not an absolute http(s) URL.
    #[error("Invalid audit target '{url}': {reason}")]
    InvalidTarget {
        /// The rejected input
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// Both navigation wait strategies failed (or no browsing context could be opened).
    #[error("Rendering failed for {url}: {reason}")]
    RenderFailure {
        /// The URL that could not be rendered
        url: String,
        /// Failure details of the primary and fallback attempts
        reason: String,
    },
}

/// Failures of the `HttpClient` capability.
#[derive(Error, Debug)]
pub enum HttpError {
    /// The request could not be sent or the response could not be read.
    #[error("{kind}: {source}")]
    Request {
        /// Categorized failure kind
        kind: HttpErrorKind,
        /// Underlying reqwest error
        #[source]
        source: ReqwestError,
    },

    /// The request did not complete within the per-request timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The URL could not be parsed.
    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),
}

impl HttpError {
    /// Whether this failure was a timeout (either ours or reqwest's).
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            HttpError::Timeout(_)
                | HttpError::Request {
                    kind: HttpErrorKind::Timeout,
                    ..
                }
        )
    }
}

impl From<ReqwestError> for HttpError {
    fn from(source: ReqwestError) -> Self {
        HttpError::Request {
            kind: super::categorize_reqwest_error(&source),
            source,
        }
    }
}

/// Categories of transport-level HTTP failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpErrorKind {
    Builder,
    Redirect,
    Timeout,
    Connect,
    Request,
    Body,
    Decode,
    Other,
}

impl std::fmt::Display for HttpErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl HttpErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpErrorKind::Builder => "HTTP request builder error",
            HttpErrorKind::Redirect => "HTTP redirect error",
            HttpErrorKind::Timeout => "HTTP request timeout",
            HttpErrorKind::Connect => "HTTP connect error",
            HttpErrorKind::Request => "HTTP request error",
            HttpErrorKind::Body => "HTTP body error",
            HttpErrorKind::Decode => "HTTP decode error",
            HttpErrorKind::Other => "HTTP error",
        }
    }
}

/// Failures of the `RenderingService` capability.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The browser or a browsing context could not be created or driven.
    #[error("Browser error: {0}")]
    Browser(String),

    /// Navigation did not reach its wait condition.
    #[error("Navigation to {url} failed: {reason}")]
    Navigation {
        /// Navigation target
        url: String,
        /// Failure details
        reason: String,
    },

    /// Navigation did not reach its wait condition in time.
    #[error("Navigation to {url} timed out after {after:?}")]
    Timeout {
        /// Navigation target
        url: String,
        /// Configured ceiling
        after: Duration,
    },

    /// Script evaluation, DOM read or capture failed.
    #[error("Page operation '{operation}' failed: {reason}")]
    PageOperation {
        /// Operation name (e.g. "screenshot")
        operation: &'static str,
        /// Failure details
        reason: String,
    },
}

/// Stage-local failures.
///
/// These never propagate out of the orchestrator: each stage converts them into
/// its default signal value plus an `error` string.
#[derive(Error, Debug)]
pub enum StageError {
    /// A stage's HTTP fetch failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A URL the stage depends on could not be parsed.
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        /// The unparsable URL
        url: String,
        /// Parser error
        #[source]
        source: url::ParseError,
    },

    /// The Lighthouse runner failed or produced unusable output.
    #[error("Lighthouse error: {0}")]
    Lighthouse(String),

    /// Filesystem failure (screenshots, artifacts).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A rendering capability failed inside a non-fatal step.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Audit stages, used to record which stages degraded to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Render,
    Screenshot,
    Telemetry,
    OnPage,
    Links,
    Site,
    Tech,
    Quality,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Render => "render",
            Stage::Screenshot => "screenshot",
            Stage::Telemetry => "telemetry",
            Stage::OnPage => "on-page analysis",
            Stage::Links => "link analysis",
            Stage::Site => "site inspection",
            Stage::Tech => "technology fingerprinting",
            Stage::Quality => "quality scoring",
        }
    }
}

/// A stage that fell back to defaults, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegradedStage {
    /// Which stage degraded
    pub stage: Stage,
    /// Human-readable reason
    pub reason: String,
}

impl DegradedStage {
    /// Records a degradation and logs it at warn level.
    pub fn record(stage: Stage, reason: impl std::fmt::Display) -> Self {
        let reason = reason.to_string();
        log::warn!("Stage '{}' degraded to defaults: {}", stage, reason);
        DegradedStage { stage, reason }
    }
}
