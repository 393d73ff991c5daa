//! Use case orchestration for polguard.
//!
//! This crate provides the application layer: use cases that coordinate the source, domain,
//! settings, and render layers. It is intentionally thin and delegates heavy lifting to the
//! appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod explain;
mod render;
mod report;
mod scan;

pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use render::{ReportFormat, render_report, write_artifact, write_report};
pub use report::{parse_report_json, serialize_report, to_renderable};
pub use scan::{ScanInput, ScanOutput, run_scan, verdict_exit_code};
