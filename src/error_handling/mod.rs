//! Error handling.
//!
//! This module provides:
//! - Error type definitions for the audit pipeline and its capabilities
//! - Transport error categorization
//! - The `Stage` enum and `DegradedStage` records
//!
//! Only [`AuditError`] is fatal. Every other error is caught at the stage
//! boundary and converted into default values plus a recorded degradation.

mod categorization;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use types::{
    AuditError, DegradedStage, HttpError, HttpErrorKind, InitializationError, RenderError, Stage,
    StageError,
};
