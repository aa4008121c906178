//! Lab quality scores from Lighthouse.

mod cli;
mod lhr;
mod types;

use async_trait::async_trait;

use crate::error_handling::StageError;

pub use cli::LighthouseCli;
pub use lhr::parse_lhr;
pub use types::{CategoryScores, QualityMetrics, QualitySignals};

/// Produces category scores and lab metrics for a URL.
#[async_trait]
pub trait LighthouseService: Send + Sync {
    async fn score(&self, url: &str) -> Result<QualitySignals, StageError>;
}

/// Stand-in used when Lighthouse is switched off; always degrades.
pub struct DisabledLighthouse;

#[async_trait]
impl LighthouseService for DisabledLighthouse {
    async fn score(&self, _url: &str) -> Result<QualitySignals, StageError> {
        Err(StageError::Lighthouse("Lighthouse disabled".to_string()))
    }
}
