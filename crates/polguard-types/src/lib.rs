//! Stable DTOs and IDs used across the polguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for findings, policy results and the emitted report
//! - stable string rule IDs
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use receipt::{
    Finding, PolicyId, PolicyReport, PolicyResult, Risk, RiskCounts, SCHEMA_REPORT_V1, ScanData,
    ScanReport, StatementView, ToolMeta, Verdict,
};
