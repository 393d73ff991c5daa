use polguard_domain::policy::{EffectiveConfig, FailOn, RulePolicy};
use polguard_types::{Risk, ids};
use std::collections::BTreeMap;

pub const DEFAULT_PROFILE: &str = "default";
pub const STRICT_PROFILE: &str = "strict";

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> Option<EffectiveConfig> {
    match profile {
        DEFAULT_PROFILE => Some(default_profile()),
        STRICT_PROFILE => Some(strict_profile()),
        _ => None,
    }
}

pub fn known_profiles() -> &'static [&'static str] {
    &[DEFAULT_PROFILE, STRICT_PROFILE]
}

fn default_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: DEFAULT_PROFILE.to_string(),
        fail_on: FailOn::Risk(Risk::High),
        min_risk: Risk::Low,
        keep_passing: false,
        rules: rule_table(false),
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: STRICT_PROFILE.to_string(),
        fail_on: FailOn::Risk(Risk::Medium),
        min_risk: Risk::Low,
        keep_passing: false,
        rules: rule_table(true),
    }
}

fn rule_table(strict: bool) -> BTreeMap<String, RulePolicy> {
    let opt_in = || {
        if strict {
            RulePolicy::enabled()
        } else {
            RulePolicy::disabled()
        }
    };

    let mut m = BTreeMap::new();
    m.insert(ids::RULE_WILDCARD_ACTION.to_string(), RulePolicy::enabled());
    m.insert(ids::RULE_WILDCARD_RESOURCE.to_string(), RulePolicy::enabled());
    m.insert(ids::RULE_WILDCARD_ALL.to_string(), RulePolicy::enabled());
    m.insert(ids::RULE_SERVICE_WILDCARD.to_string(), opt_in());
    m.insert(ids::RULE_ALLOW_NOT_ACTION.to_string(), opt_in());
    m.insert(ids::RULE_ALLOW_NOT_RESOURCE.to_string(), opt_in());
    m
}
