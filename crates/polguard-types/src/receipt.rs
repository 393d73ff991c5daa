use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

/// Stable schema identifier for polguard reports.
pub const SCHEMA_REPORT_V1: &str = "polguard.report.v1";

/// Risk is ordered: `Low < Medium < High < Critical`.
///
/// Declaration order is the ordering; sinks rely on it to sort and filter.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    Low,
    Medium,
    High,
    Critical,
}

impl Risk {
    /// All levels, lowest first.
    pub const ALL: [Risk; 4] = [Risk::Low, Risk::Medium, Risk::High, Risk::Critical];

    pub fn as_str(self) -> &'static str {
        match self {
            Risk::Low => "Low",
            Risk::Medium => "Medium",
            Risk::High => "High",
            Risk::Critical => "Critical",
        }
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected risk condition, attributable to exactly one rule and one statement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    /// Position of the originating statement within its policy document (0-based).
    pub statement_index: usize,
    pub risk: Risk,
    pub rule_id: String,
    pub reason: String,

    /// Stable identifier intended for dedup and trending. Filled in by the application layer,
    /// never by rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

impl Finding {
    pub fn new(
        statement_index: usize,
        risk: Risk,
        rule_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            statement_index,
            risk,
            rule_id: rule_id.into(),
            reason: reason.into(),
            fingerprint: None,
        }
    }
}

/// Opaque identifier pair supplied by the policy source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct PolicyId {
    pub name: String,
    pub arn: String,
}

impl PolicyId {
    pub fn new(name: impl Into<String>, arn: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arn: arn.into(),
        }
    }
}

/// Findings for one policy, in statement order then rule order.
///
/// An empty `findings` list means the policy passed every rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyResult {
    pub policy: PolicyId,
    pub findings: Vec<Finding>,
}

impl PolicyResult {
    pub fn passed(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn max_risk(&self) -> Option<Risk> {
        self.findings.iter().map(|f| f.risk).max()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RiskCounts {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
    pub critical: u32,
}

impl RiskCounts {
    pub fn from_findings<'a>(findings: impl IntoIterator<Item = &'a Finding>) -> Self {
        let mut counts = RiskCounts::default();
        for f in findings {
            match f.risk {
                Risk::Low => counts.low += 1,
                Risk::Medium => counts.medium += 1,
                Risk::High => counts.high += 1,
                Risk::Critical => counts.critical += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> u32 {
        self.low + self.medium + self.high + self.critical
    }
}

/// Display copy of a statement referenced by at least one finding.
///
/// The engine itself only keeps statement indexes; reports carry these so sinks can print
/// the offending `Action`/`Resource` values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StatementView {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    pub effect: String,
    pub actions: Vec<String>,
    pub resources: Vec<String>,
}

/// One policy as it appears in the emitted report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyReport {
    pub name: String,
    pub arn: String,
    pub findings: Vec<Finding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statements: Vec<StatementView>,
}

impl PolicyReport {
    pub fn statement(&self, index: usize) -> Option<&StatementView> {
        self.statements.iter().find(|s| s.index == index)
    }
}

/// Polguard-specific summary payload for the report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScanData {
    pub profile: String,

    pub policies_scanned: u32,
    pub statements_scanned: u32,

    /// Findings produced by the engine before allowlists and `min_risk` were applied.
    pub findings_total: u32,
    pub findings_emitted: u32,
    pub findings_suppressed: u32,

    pub counts: RiskCounts,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScanReport {
    /// Versioned schema identifier for the report shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub policies: Vec<PolicyReport>,
    pub data: ScanData,
}
