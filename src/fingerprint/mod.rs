//! Technology stack fingerprinting.
//!
//! Detection is signature based: each label carries a handful of markup
//! patterns (see [`signatures`]) that are matched against the lowercased
//! response body. CMS detection prefers the `generator` meta tag.

mod detect;
mod patterns;
pub mod signatures;
mod types;

pub use detect::{fingerprint, TechFingerprinter};
pub use signatures::SIGNATURES_VERSION;
pub use types::TechSignals;
