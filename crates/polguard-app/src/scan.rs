//! The `scan` use case: evaluate every policy and produce a report.

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use polguard_domain::fingerprint::fingerprint_for_finding;
use polguard_domain::model::{Statement, ValueSet};
use polguard_domain::policy::EffectiveConfig;
use polguard_domain::report::{compute_verdict, count_findings};
use polguard_domain::RuleEngine;
use polguard_settings::{Overrides, ResolvedConfig};
use polguard_source::NamedPolicy;
use polguard_types::{
    Finding, PolicyReport, PolicyResult, SCHEMA_REPORT_V1, ScanData, ScanReport, StatementView,
    ToolMeta, Verdict,
};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use time::OffsetDateTime;

/// Input for the scan use case.
#[derive(Clone, Debug)]
pub struct ScanInput<'a> {
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Policies to evaluate, in source order.
    pub policies: Vec<NamedPolicy>,
}

/// Output from the scan use case.
#[derive(Clone, Debug)]
pub struct ScanOutput {
    /// The generated report.
    pub report: ScanReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// One policy after normalization and evaluation, before filtering.
struct Evaluated {
    result: PolicyResult,
    statements: Vec<Statement>,
}

/// Run the scan use case: parse config, evaluate policies, filter, produce report.
pub fn run_scan(input: ScanInput<'_>) -> anyhow::Result<ScanOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        polguard_settings::PolguardConfigV1::default()
    } else {
        polguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved = polguard_settings::resolve_config(cfg, input.overrides.clone())
        .context("resolve config")?;
    let effective = &resolved.effective;

    let engine = RuleEngine::from_config(effective);
    log::debug!(
        "profile {}: rules {}",
        effective.profile,
        engine.rule_ids().join(", ")
    );

    // Policies are independent; collect keeps source order.
    let evaluated = input
        .policies
        .par_iter()
        .map(|policy| evaluate_policy(&engine, policy))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let allowlists = build_allowlists(effective)?;

    let mut findings_total = 0u32;
    let mut findings_suppressed = 0u32;
    let mut statements_scanned = 0u32;
    let mut results = Vec::with_capacity(evaluated.len());
    let mut views = Vec::with_capacity(evaluated.len());

    for Evaluated { result, statements } in evaluated {
        statements_scanned += statements.len() as u32;
        findings_total += result.findings.len() as u32;

        let PolicyResult { policy, findings } = result;
        let mut kept = Vec::with_capacity(findings.len());
        for mut finding in findings {
            if is_suppressed(&finding, &policy.name, effective, &allowlists) {
                findings_suppressed += 1;
                continue;
            }
            finding.fingerprint = Some(fingerprint_for_finding(
                &finding.rule_id,
                &policy.arn,
                finding.statement_index,
            ));
            kept.push(finding);
        }

        views.push(statement_views(&statements, &kept));
        results.push(PolicyResult {
            policy,
            findings: kept,
        });
    }

    let verdict = compute_verdict(&results, effective.fail_on);
    let counts = count_findings(&results);
    let findings_emitted = counts.total();

    let policies_scanned = results.len() as u32;
    let policies: Vec<PolicyReport> = results
        .into_iter()
        .zip(views)
        .filter(|(result, _)| effective.keep_passing || !result.passed())
        .map(|(result, statements)| PolicyReport {
            name: result.policy.name,
            arn: result.policy.arn,
            findings: result.findings,
            statements,
        })
        .collect();

    log::info!(
        "scanned {policies_scanned} policies ({statements_scanned} statements): \
         {findings_emitted} findings reported, {findings_suppressed} suppressed, verdict {}",
        verdict_label(verdict)
    );

    let report = ScanReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "polguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        policies,
        data: ScanData {
            profile: effective.profile.clone(),
            policies_scanned,
            statements_scanned,
            findings_total,
            findings_emitted,
            findings_suppressed,
            counts,
        },
    };

    Ok(ScanOutput {
        report,
        resolved_config: resolved,
    })
}

/// Map verdict to exit code: 0 = pass, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Fail => 2,
    }
}

fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Pass => "pass",
        Verdict::Fail => "fail",
    }
}

fn evaluate_policy(engine: &RuleEngine, policy: &NamedPolicy) -> anyhow::Result<Evaluated> {
    let statements = polguard_domain::normalize(&policy.document)
        .with_context(|| format!("malformed policy document: {}", policy.id.name))?;
    let result = PolicyResult {
        policy: policy.id.clone(),
        findings: engine.evaluate(&statements),
    };
    log::debug!(
        "policy {}: {} statements, {} findings, max risk {}",
        policy.id.name,
        statements.len(),
        result.findings.len(),
        result.max_risk().map_or("none", |r| r.as_str())
    );
    Ok(Evaluated { result, statements })
}

/// Compile per-rule allowlists. Rules without patterns get no entry.
fn build_allowlists(cfg: &EffectiveConfig) -> anyhow::Result<BTreeMap<String, GlobSet>> {
    let mut out = BTreeMap::new();
    for (rule_id, policy) in cfg.rules.iter().filter(|(_, p)| !p.allow.is_empty()) {
        let mut builder = GlobSetBuilder::new();
        for pattern in &policy.allow {
            let glob = Glob::new(pattern)
                .with_context(|| format!("invalid allow glob for {rule_id}: {pattern}"))?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .with_context(|| format!("build allowlist for {rule_id}"))?;
        out.insert(rule_id.clone(), set);
    }
    Ok(out)
}

fn is_suppressed(
    finding: &Finding,
    policy_name: &str,
    cfg: &EffectiveConfig,
    allowlists: &BTreeMap<String, GlobSet>,
) -> bool {
    if finding.risk < cfg.min_risk {
        return true;
    }
    allowlists
        .get(&finding.rule_id)
        .is_some_and(|set| set.is_match(policy_name))
}

/// Views of the statements referenced by `findings`, by ascending index.
fn statement_views(statements: &[Statement], findings: &[Finding]) -> Vec<StatementView> {
    let referenced: BTreeSet<usize> = findings.iter().map(|f| f.statement_index).collect();
    referenced
        .into_iter()
        .filter_map(|index| {
            let stmt = statements.get(index)?;
            Some(StatementView {
                index,
                sid: stmt.sid.clone(),
                effect: stmt.effect.as_str().to_string(),
                actions: display_values(&stmt.action, stmt.not_action.as_ref()),
                resources: display_values(&stmt.resource, stmt.not_resource.as_ref()),
            })
        })
        .collect()
}

/// `NotAction`/`NotResource` entries are shown with a `!` prefix so sinks can tell them apart.
fn display_values(values: &ValueSet, negated: Option<&ValueSet>) -> Vec<String> {
    let mut out: Vec<String> = values.iter().cloned().collect();
    if let Some(negated) = negated {
        out.extend(negated.iter().map(|v| format!("!{v}")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use polguard_types::{PolicyId, Risk, ids};
    use serde_json::json;

    fn named(name: &str, document: serde_json::Value) -> NamedPolicy {
        NamedPolicy {
            id: PolicyId::new(name, format!("arn:aws:iam::123456789012:policy/{name}")),
            document,
        }
    }

    fn mock_policies() -> Vec<NamedPolicy> {
        vec![
            named(
                "TestRiskyPolicy",
                json!({
                    "Version": "2012-10-17",
                    "Statement": [{"Effect": "Allow", "Action": "*", "Resource": "*"}]
                }),
            ),
            named(
                "SafePolicy",
                json!({
                    "Version": "2012-10-17",
                    "Statement": [{
                        "Effect": "Allow",
                        "Action": ["s3:GetObject"],
                        "Resource": ["arn:aws:s3:::my-bucket/*"]
                    }]
                }),
            ),
        ]
    }

    fn scan(config_text: &str, policies: Vec<NamedPolicy>) -> anyhow::Result<ScanReport> {
        let input = ScanInput {
            config_text,
            overrides: Overrides::default(),
            policies,
        };
        Ok(run_scan(input)?.report)
    }

    fn rule_ids(report: &PolicyReport) -> Vec<&str> {
        report.findings.iter().map(|f| f.rule_id.as_str()).collect()
    }

    #[test]
    fn empty_config_uses_defaults() {
        let input = ScanInput {
            config_text: "",
            overrides: Overrides::default(),
            policies: Vec::new(),
        };
        let output = run_scan(input).expect("run_scan");
        assert_eq!(output.resolved_config.effective.profile, "default");
        assert_eq!(output.report.verdict, Verdict::Pass);
        assert!(output.report.policies.is_empty());
        assert_eq!(output.report.schema, SCHEMA_REPORT_V1);
    }

    #[test]
    fn risky_policy_fails_and_safe_policy_is_dropped() {
        let report = scan("", mock_policies()).expect("scan");
        assert_eq!(report.verdict, Verdict::Fail);
        assert_eq!(report.policies.len(), 1);

        let risky = &report.policies[0];
        assert_eq!(risky.name, "TestRiskyPolicy");
        assert_eq!(
            rule_ids(risky),
            vec![
                ids::RULE_WILDCARD_ACTION,
                ids::RULE_WILDCARD_RESOURCE,
                ids::RULE_WILDCARD_ALL
            ]
        );
        assert!(risky.findings.iter().all(|f| f.fingerprint.is_some()));

        let view = risky.statement(0).expect("statement view");
        assert_eq!(view.effect, "Allow");
        assert_eq!(view.actions, vec!["*".to_string()]);
        assert_eq!(view.resources, vec!["*".to_string()]);

        assert_eq!(report.data.policies_scanned, 2);
        assert_eq!(report.data.statements_scanned, 2);
        assert_eq!(report.data.findings_total, 3);
        assert_eq!(report.data.findings_emitted, 3);
        assert_eq!(report.data.counts.high, 2);
        assert_eq!(report.data.counts.critical, 1);
    }

    #[test]
    fn keep_passing_retains_policies_without_findings() {
        let report = scan("keep_passing = true", mock_policies()).expect("scan");
        assert_eq!(report.policies.len(), 2);
        assert_eq!(report.policies[1].name, "SafePolicy");
        assert!(report.policies[1].findings.is_empty());
        assert!(report.policies[1].statements.is_empty());
    }

    #[test]
    fn min_risk_filters_and_counts_suppressed() {
        let report = scan("min_risk = \"critical\"", mock_policies()).expect("scan");
        let risky = &report.policies[0];
        assert_eq!(rule_ids(risky), vec![ids::RULE_WILDCARD_ALL]);
        assert_eq!(report.data.findings_total, 3);
        assert_eq!(report.data.findings_emitted, 1);
        assert_eq!(report.data.findings_suppressed, 2);
    }

    #[test]
    fn allowlist_suppresses_matching_policy_names() {
        let toml = r#"
[rules.WILDCARD_ACTION]
allow = ["TestRisky*"]
"#;
        let report = scan(toml, mock_policies()).expect("scan");
        let risky = &report.policies[0];
        assert_eq!(
            rule_ids(risky),
            vec![ids::RULE_WILDCARD_RESOURCE, ids::RULE_WILDCARD_ALL]
        );
        assert_eq!(report.data.findings_suppressed, 1);
    }

    #[test]
    fn fail_on_never_passes_with_findings() {
        let input = ScanInput {
            config_text: "",
            overrides: Overrides {
                fail_on: Some("never".to_string()),
                ..Overrides::default()
            },
            policies: mock_policies(),
        };
        let report = run_scan(input).expect("run_scan").report;
        assert_eq!(report.verdict, Verdict::Pass);
        assert_eq!(report.data.findings_emitted, 3);
    }

    #[test]
    fn strict_profile_reports_service_wildcards() {
        let policies = vec![named(
            "S3Admin",
            json!({"Statement": {"Action": "s3:*", "Resource": "arn:aws:s3:::b"}}),
        )];
        assert_eq!(scan("", policies.clone()).expect("scan").verdict, Verdict::Pass);

        let report = scan("profile = \"strict\"", policies).expect("scan");
        assert_eq!(report.verdict, Verdict::Fail);
        assert_eq!(report.policies[0].findings[0].risk, Risk::Medium);
        assert_eq!(
            report.policies[0].findings[0].rule_id,
            ids::RULE_SERVICE_WILDCARD
        );
    }

    #[test]
    fn not_action_values_are_marked_in_views() {
        let policies = vec![named(
            "Inverse",
            json!({"Statement": {"NotAction": "iam:*", "Resource": "*"}}),
        )];
        let report = scan("profile = \"strict\"", policies).expect("scan");
        let view = report.policies[0].statement(0).expect("view");
        assert_eq!(view.actions, vec!["!iam:*".to_string()]);
    }

    #[test]
    fn malformed_document_names_the_policy() {
        let policies = vec![named("Broken", json!({"Version": "2012-10-17"}))];
        let err = scan("", policies).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("Broken"), "{msg}");
    }

    #[test]
    fn fingerprints_depend_on_arn() {
        let mut policies = mock_policies();
        policies.truncate(1);
        let mut renamed = policies.clone();
        renamed[0].id.arn = "arn:other".to_string();

        let a = scan("", policies).expect("scan");
        let b = scan("", renamed).expect("scan");
        assert_ne!(
            a.policies[0].findings[0].fingerprint,
            b.policies[0].findings[0].fingerprint
        );
    }

    #[test]
    fn verdict_exit_codes() {
        assert_eq!(verdict_exit_code(Verdict::Pass), 0);
        assert_eq!(verdict_exit_code(Verdict::Fail), 2);
    }
}
