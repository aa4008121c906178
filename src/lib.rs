//! site_audit library: single-page web audits
//!
//! This library renders one page in headless Chromium, collects on-page SEO,
//! link, crawl-directive, technology and Lighthouse signals, scores them and
//! writes an HTML/JSON/PDF report.
//!
//! # Example
//!
//! ```no_run
//! use site_audit::{run_audit, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     skip_lighthouse: true,
//!     ..Default::default()
//! };
//!
//! let outcome = run_audit(&config, "https://example.com").await?;
//! println!(
//!     "Composite score {} - report at {}",
//!     outcome.report.scores.composite,
//!     outcome.artifacts.html_path.display()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime and, for real audits, a Chrome or
//! Chromium binary. Lighthouse is optional.

pub mod audit;
pub mod config;
pub mod error_handling;
pub mod fingerprint;
pub mod http;
pub mod initialization;
pub mod links;
pub mod parse;
pub mod quality;
pub mod render;
pub mod report;
pub mod scoring;
pub mod server;
pub mod site;
pub mod utils;

// Re-export public API
pub use audit::{AuditOrchestrator, ReportData};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::AuditError;
pub use report::ReportArtifacts;
pub use run::{build_orchestrator, run_audit, AuditOutcome};
pub use scoring::Scores;

// Wiring of the concrete services behind the orchestrator
mod run {
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::{Context, Result};

    use crate::audit::{AuditOrchestrator, ReportData};
    use crate::config::Config;
    use crate::initialization::init_http_client;
    use crate::links::LinkChecker;
    use crate::quality::{DisabledLighthouse, LighthouseCli, LighthouseService};
    use crate::render::{ChromiumRenderingService, RenderCollector, RenderingService};
    use crate::report::{write_artifacts, ReportArtifacts};

    /// A finished audit and the files written for it.
    #[derive(Debug, Clone)]
    pub struct AuditOutcome {
        /// The scored report data
        pub report: ReportData,
        /// Paths of the written artifacts
        pub artifacts: ReportArtifacts,
    }

    /// Builds an orchestrator on top of `renderer` using `config`.
    ///
    /// The HTTP client and Lighthouse runner are created here; Lighthouse is
    /// replaced by [`DisabledLighthouse`] when `config.skip_lighthouse` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn build_orchestrator(
        config: &Config,
        renderer: Arc<dyn RenderingService>,
    ) -> Result<AuditOrchestrator> {
        let client = init_http_client(config).context("Failed to initialize HTTP client")?;

        let lighthouse: Arc<dyn LighthouseService> = if config.skip_lighthouse {
            log::info!("Lighthouse disabled; category scores fall back to defaults");
            Arc::new(DisabledLighthouse)
        } else {
            Arc::new(
                LighthouseCli::new(config.lighthouse_bin.clone())
                    .with_chrome_path(config.chrome_executable.clone()),
            )
        };

        let collector = RenderCollector::new(renderer, config.output_dir.clone())
            .with_navigation_timeout(Duration::from_secs(config.navigation_timeout_seconds));
        let links = LinkChecker::new(client.clone())
            .with_timeout(Duration::from_secs(config.link_check_timeout_seconds));

        Ok(AuditOrchestrator::new(collector, client, lighthouse).with_link_checker(links))
    }

    /// Launches Chromium, audits `url` and writes the report artifacts.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser cannot be launched, the URL is invalid,
    /// the page cannot be rendered, or the HTML/JSON artifacts cannot be written.
    pub async fn run_audit(config: &Config, url: &str) -> Result<AuditOutcome> {
        let renderer: Arc<dyn RenderingService> = Arc::new(
            ChromiumRenderingService::launch(config.chrome_executable.as_deref())
                .await
                .context("Failed to launch headless browser")?,
        );
        let orchestrator = build_orchestrator(config, Arc::clone(&renderer))?;

        let report = orchestrator.run(url).await?;
        let artifacts = write_artifacts(&report, Arc::new(config.clone()), Some(renderer))
            .await
            .context("Failed to write report artifacts")?;

        Ok(AuditOutcome { report, artifacts })
    }
}
