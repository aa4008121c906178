mod artifacts;
mod health;
mod report;

pub use artifacts::artifact_handler;
pub use health::health_handler;
pub use report::run_report_handler;
