use crate::model::{Effect, Statement, ValueSet};
use crate::policy::{EffectiveConfig, FailOn, RulePolicy};
use polguard_types::Risk;
use std::collections::BTreeMap;

fn set(values: &[&str]) -> ValueSet {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn statement(effect: Effect, actions: &[&str], resources: &[&str]) -> Statement {
    Statement {
        effect,
        action: set(actions),
        resource: set(resources),
        ..Statement::default()
    }
}

pub fn statement_not_action(not_actions: &[&str], resources: &[&str]) -> Statement {
    Statement {
        not_action: Some(set(not_actions)),
        resource: set(resources),
        ..Statement::default()
    }
}

pub fn statement_not_resource(actions: &[&str], not_resources: &[&str]) -> Statement {
    Statement {
        action: set(actions),
        not_resource: Some(set(not_resources)),
        ..Statement::default()
    }
}

pub fn config_with_rules(rule_ids: &[&str], fail_on: FailOn) -> EffectiveConfig {
    let rules: BTreeMap<String, RulePolicy> = rule_ids
        .iter()
        .map(|id| (id.to_string(), RulePolicy::enabled()))
        .collect();
    EffectiveConfig {
        profile: "test".to_string(),
        fail_on,
        min_risk: Risk::Low,
        keep_passing: false,
        rules,
    }
}
