//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `site_audit` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use site_audit::initialization::init_logger_with;
use site_audit::render::{ChromiumRenderingService, RenderingService};
use site_audit::server::{start_server, ServerState};
use site_audit::{build_orchestrator, run_audit, Config, LogFormat, LogLevel};

/// Single-page web audits: SEO, links, crawl directives, tech stack and Lighthouse.
#[derive(Debug, Parser)]
#[command(name = "site_audit", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Audit one URL and write the report to the output directory
    Audit {
        /// URL to audit (https:// is assumed when no scheme is given)
        url: String,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Serve the HTTP API (POST /api/run-report)
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,

        /// Base URL for artifact links in API responses
        #[arg(long, env = "PUBLIC_BASE_URL")]
        public_base_url: Option<String>,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// Directory for screenshots and report artifacts
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,

    /// Skip Lighthouse (performance and usability default to 60)
    #[arg(long)]
    no_lighthouse: bool,

    /// Do not print the report to PDF
    #[arg(long)]
    no_pdf: bool,

    /// Chrome/Chromium executable (auto-detected when omitted)
    #[arg(long, env = "CHROME_PATH")]
    chrome: Option<PathBuf>,

    /// Lighthouse CLI binary
    #[arg(long, env = "LIGHTHOUSE_BIN", default_value = "lighthouse")]
    lighthouse_bin: String,

    /// Timeout in seconds for plain HTTP fetches
    #[arg(long, default_value_t = 10)]
    http_timeout: u64,
}

impl CommonArgs {
    fn into_config(self, public_base_url: Option<String>) -> Config {
        Config {
            output_dir: self.output_dir,
            log_level: self.log_level,
            log_format: self.log_format,
            http_timeout_seconds: self.http_timeout,
            chrome_executable: self.chrome,
            lighthouse_bin: self.lighthouse_bin,
            skip_lighthouse: self.no_lighthouse,
            export_pdf: !self.no_pdf,
            public_base_url,
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Audit { url, common } => {
            let config = common.into_config(None);
            init_logger_with(config.log_level.clone().into(), config.log_format.clone())
                .context("Failed to initialize logger")?;

            match run_audit(&config, &url).await {
                Ok(outcome) => {
                    let scores = outcome.report.scores;
                    println!(
                        "✅ Audited {} - composite {} (on-page {}, links {}, performance {}, usability {}, social {})",
                        outcome.report.final_url,
                        scores.composite,
                        scores.onpage,
                        scores.links,
                        scores.performance,
                        scores.usability,
                        scores.social
                    );
                    println!("HTML: {}", outcome.artifacts.html_path.display());
                    println!("JSON: {}", outcome.artifacts.json_path.display());
                    if let Some(pdf) = &outcome.artifacts.pdf_path {
                        println!("PDF : {}", pdf.display());
                    }
                    if !outcome.report.degraded_stages.is_empty() {
                        println!(
                            "⚠️  {} stage(s) fell back to defaults - see the report for details",
                            outcome.report.degraded_stages.len()
                        );
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("site_audit error: {:#}", e);
                    process::exit(1);
                }
            }
        }
        Command::Serve {
            port,
            public_base_url,
            common,
        } => {
            let config = common.into_config(public_base_url);
            init_logger_with(config.log_level.clone().into(), config.log_format.clone())
                .context("Failed to initialize logger")?;

            let renderer: Arc<dyn RenderingService> = Arc::new(
                ChromiumRenderingService::launch(config.chrome_executable.as_deref())
                    .await
                    .context("Failed to launch headless browser")?,
            );
            let orchestrator = build_orchestrator(&config, Arc::clone(&renderer))?;
            let state = ServerState {
                orchestrator: Arc::new(orchestrator),
                renderer: Some(renderer),
                config: Arc::new(config),
            };
            start_server(port, state).await
        }
    }
}
