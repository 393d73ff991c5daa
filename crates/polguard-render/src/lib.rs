//! Rendering utilities for report sinks (Markdown, HTML, CSV, XLSX).
//!
//! Every renderer states "no findings" explicitly when given an empty report; a blank file
//! would be indistinguishable from a failed run.

#![forbid(unsafe_code)]

mod csv;
mod html;
mod markdown;
mod model;
mod xlsx;

pub use csv::render_csv;
pub use html::render_html;
pub use markdown::render_markdown;
pub use model::{
    RenderableData, RenderableFinding, RenderablePolicy, RenderableReport, RenderableRisk,
    RenderableVerdict,
};
pub use xlsx::render_xlsx;

/// Error type of the XLSX writer.
pub use rust_xlsxwriter::XlsxError;

pub(crate) const REPORT_TITLE: &str = "AWS Policy Analyzer Report";
pub(crate) const NO_FINDINGS: &str = "No risky policies found.";
