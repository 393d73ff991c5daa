use crate::policy::FailOn;
use polguard_types::{PolicyResult, RiskCounts, Verdict};

/// Verdict over every finding in `results`.
pub fn compute_verdict(results: &[PolicyResult], fail_on: FailOn) -> Verdict {
    let failed = results
        .iter()
        .flat_map(|r| r.findings.iter())
        .any(|f| fail_on.is_triggered_by(f.risk));
    if failed { Verdict::Fail } else { Verdict::Pass }
}

pub fn count_findings(results: &[PolicyResult]) -> RiskCounts {
    RiskCounts::from_findings(results.iter().flat_map(|r| r.findings.iter()))
}
