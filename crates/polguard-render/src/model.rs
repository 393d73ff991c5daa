#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RenderableRisk {
    Low,
    Medium,
    High,
    Critical,
}

impl RenderableRisk {
    pub fn label(self) -> &'static str {
        match self {
            RenderableRisk::Low => "Low",
            RenderableRisk::Medium => "Medium",
            RenderableRisk::High => "High",
            RenderableRisk::Critical => "Critical",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdict {
    Pass,
    Fail,
}

impl RenderableVerdict {
    pub fn label(self) -> &'static str {
        match self {
            RenderableVerdict::Pass => "PASS",
            RenderableVerdict::Fail => "FAIL",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFinding {
    pub statement_index: usize,
    pub rule_id: String,
    pub risk: RenderableRisk,
    pub reason: String,
    /// Actions of the referenced statement; empty when the report does not carry them.
    pub actions: Vec<String>,
    pub resources: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderablePolicy {
    pub name: String,
    pub arn: String,
    pub findings: Vec<RenderableFinding>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub profile: String,
    pub policies_scanned: u32,
    pub findings_emitted: u32,
    pub findings_suppressed: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdict,
    pub policies: Vec<RenderablePolicy>,
    pub data: RenderableData,
}

impl RenderableReport {
    pub fn has_findings(&self) -> bool {
        self.policies.iter().any(|p| !p.findings.is_empty())
    }
}

/// `["a", "b"]` -> `"a, b"`.
pub(crate) fn join_values(values: &[String]) -> String {
    values.join(", ")
}
