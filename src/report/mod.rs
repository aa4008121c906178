//! Report rendering and export.
//!
//! [`render_html`] turns a [`crate::audit::ReportData`] into a standalone HTML
//! page; [`write_artifacts`] stores it next to a JSON dump and an optional PDF.

mod export;
mod format;
mod html;

pub use export::{export_pdf, write_artifacts, ReportArtifacts};
pub use html::render_html;
