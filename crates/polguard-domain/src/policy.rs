use polguard_types::Risk;
use std::collections::BTreeMap;

/// When a scan should fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailOn {
    /// Fail when any reported finding has at least this risk.
    Risk(Risk),
    Never,
}

impl FailOn {
    pub fn is_triggered_by(self, risk: Risk) -> bool {
        match self {
            FailOn::Risk(threshold) => risk >= threshold,
            FailOn::Never => false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RulePolicy {
    pub enabled: bool,
    /// Policy-name glob patterns whose findings for this rule are suppressed.
    pub allow: Vec<String>,
}

impl RulePolicy {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            allow: Vec::new(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            allow: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub profile: String,
    pub fail_on: FailOn,
    /// Findings below this risk are not reported. The engine still produces them.
    pub min_risk: Risk,
    /// Keep policies with zero findings in the report.
    pub keep_passing: bool,
    pub rules: BTreeMap<String, RulePolicy>,
}

impl EffectiveConfig {
    pub fn rule_policy(&self, rule_id: &str) -> Option<&RulePolicy> {
        self.rules.get(rule_id).filter(|p| p.enabled)
    }

    pub fn is_enabled(&self, rule_id: &str) -> bool {
        self.rule_policy(rule_id).is_some()
    }
}
