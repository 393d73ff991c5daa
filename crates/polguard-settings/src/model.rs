use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `polguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PolguardConfigV1 {
    /// Optional schema string for tooling (`polguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `default` or `strict`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Lowest risk that fails the scan (`low`..`critical`), or `never`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// Findings below this risk are left out of the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_risk: Option<String>,

    /// Keep policies without findings in the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_passing: Option<bool>,

    /// Map of rule_id -> config.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuleConfig {
    /// Override preset enable/disable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Policy-name glob patterns whose findings for this rule are suppressed.
    #[serde(default)]
    pub allow: Vec<String>,
}
