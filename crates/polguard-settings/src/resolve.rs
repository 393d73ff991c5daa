use crate::{model::PolguardConfigV1, presets};
use anyhow::Context;
use globset::Glob;
use polguard_domain::policy::{EffectiveConfig, FailOn};
use polguard_types::Risk;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub fail_on: Option<String>,
    pub min_risk: Option<String>,
    pub keep_passing: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: PolguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| presets::DEFAULT_PROFILE.to_string());

    let Some(mut effective) = presets::preset(&profile) else {
        anyhow::bail!(
            "unknown profile: {profile} (expected one of: {})",
            presets::known_profiles().join(", ")
        );
    };

    // per-rule overrides
    for (rule_id, rc) in cfg.rules.iter() {
        let Some(entry) = effective.rules.get_mut(rule_id) else {
            let known: Vec<&str> = effective.rules.keys().map(String::as_str).collect();
            anyhow::bail!("unknown rule: {rule_id} (expected one of: {})", known.join(", "));
        };

        if let Some(enabled) = rc.enabled {
            entry.enabled = enabled;
        }
        if !rc.allow.is_empty() {
            validate_allowlist(rule_id, &rc.allow)?;
            entry.allow = rc.allow.clone();
        }
    }

    // CLI overrides win over the file.
    if let Some(fail_on_s) = overrides.fail_on.as_deref().or(cfg.fail_on.as_deref()) {
        effective.fail_on = parse_fail_on(fail_on_s).context("invalid fail_on")?;
    }

    if let Some(min_risk_s) = overrides.min_risk.as_deref().or(cfg.min_risk.as_deref()) {
        effective.min_risk = parse_risk(min_risk_s).context("invalid min_risk")?;
    }

    if let Some(keep) = overrides.keep_passing.or(cfg.keep_passing) {
        effective.keep_passing = keep;
    }

    Ok(ResolvedConfig { effective })
}

fn validate_allowlist(rule_id: &str, patterns: &[String]) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern)
            .with_context(|| format!("invalid allow glob for {rule_id}: {pattern}"))?;
    }
    Ok(())
}

fn parse_risk(v: &str) -> anyhow::Result<Risk> {
    match Risk::ALL.into_iter().find(|r| r.as_str().eq_ignore_ascii_case(v)) {
        Some(risk) => Ok(risk),
        None => anyhow::bail!("unknown risk: {v} (expected low|medium|high|critical)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    if v.eq_ignore_ascii_case("never") {
        return Ok(FailOn::Never);
    }
    parse_risk(v)
        .map(FailOn::Risk)
        .with_context(|| format!("unknown fail_on: {v} (expected low|medium|high|critical|never)"))
}
