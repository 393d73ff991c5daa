use crate::error::MalformedDocumentError;
use crate::model::Statement;
use crate::normalize::normalize;
use crate::policy::EffectiveConfig;
use crate::rules::{self, Rule};
use polguard_types::{Finding, PolicyId, PolicyResult};
use serde_json::Value;

/// Ordered, immutable rule registry.
///
/// Fixed at construction. Holds no per-call state, so one engine can be shared across
/// threads and evaluate independent documents concurrently.
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    /// Registry with exactly `rules`, evaluated in the given order.
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// `WILDCARD_ACTION`, `WILDCARD_RESOURCE`, `WILDCARD_ALL`.
    pub fn builtin() -> Self {
        Self::new(rules::builtin())
    }

    /// Rules enabled in `cfg`, in registry order.
    pub fn from_config(cfg: &EffectiveConfig) -> Self {
        Self::new(rules::enabled_in(cfg))
    }

    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Run every rule over every statement.
    ///
    /// Output order: statement order, then rule registration order within a statement.
    /// Nothing is sorted, deduplicated or dropped.
    pub fn evaluate(&self, statements: &[Statement]) -> Vec<Finding> {
        let mut findings = Vec::new();
        for (index, statement) in statements.iter().enumerate() {
            for rule in &self.rules {
                rule.evaluate(index, statement, &mut findings);
            }
        }
        findings
    }

    /// Normalize then evaluate a raw document.
    pub fn evaluate_document(
        &self,
        document: &Value,
    ) -> Result<Vec<Finding>, MalformedDocumentError> {
        let statements = normalize(document)?;
        Ok(self.evaluate(&statements))
    }

    /// Evaluate one named policy. Passing policies are returned with an empty findings list.
    pub fn evaluate_policy(
        &self,
        policy: PolicyId,
        document: &Value,
    ) -> Result<PolicyResult, MalformedDocumentError> {
        let findings = self.evaluate_document(document)?;
        Ok(PolicyResult { policy, findings })
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_ids())
            .finish()
    }
}

/// Evaluate with the built-in registry.
pub fn evaluate(statements: &[Statement]) -> Vec<Finding> {
    RuleEngine::builtin().evaluate(statements)
}
