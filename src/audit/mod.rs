//! Audit orchestration and report assembly.

mod orchestrator;
mod report_data;

pub use orchestrator::AuditOrchestrator;
pub use report_data::{ReportData, StageOutputs};
