//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, sample caps, viewports, etc.)
//! - HTTP header name constants
//! - The library `Config` struct and logging option types

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use headers::*;
pub use types::{Config, LogFormat, LogLevel};
