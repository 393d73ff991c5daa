use anyhow::Context;
use polguard_render::{
    RenderableData, RenderableFinding, RenderablePolicy, RenderableReport, RenderableRisk,
    RenderableVerdict,
};
use polguard_types::{Finding, PolicyReport, Risk, SCHEMA_REPORT_V1, ScanReport, Verdict};

pub fn parse_report_json(text: &str) -> anyhow::Result<ScanReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse polguard v1 report")
}

pub fn serialize_report(report: &ScanReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &ScanReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdict::Pass,
            Verdict::Fail => RenderableVerdict::Fail,
        },
        policies: report.policies.iter().map(renderable_policy).collect(),
        data: RenderableData {
            profile: report.data.profile.clone(),
            policies_scanned: report.data.policies_scanned,
            findings_emitted: report.data.findings_emitted,
            findings_suppressed: report.data.findings_suppressed,
        },
    }
}

fn renderable_policy(policy: &PolicyReport) -> RenderablePolicy {
    RenderablePolicy {
        name: policy.name.clone(),
        arn: policy.arn.clone(),
        findings: policy
            .findings
            .iter()
            .map(|f| renderable_finding(policy, f))
            .collect(),
    }
}

fn renderable_finding(policy: &PolicyReport, f: &Finding) -> RenderableFinding {
    let view = policy.statement(f.statement_index);
    RenderableFinding {
        statement_index: f.statement_index,
        rule_id: f.rule_id.clone(),
        risk: match f.risk {
            Risk::Low => RenderableRisk::Low,
            Risk::Medium => RenderableRisk::Medium,
            Risk::High => RenderableRisk::High,
            Risk::Critical => RenderableRisk::Critical,
        },
        reason: f.reason.clone(),
        actions: view.map(|v| v.actions.clone()).unwrap_or_default(),
        resources: view.map(|v| v.resources.clone()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{ScanInput, run_scan};
    use polguard_settings::Overrides;
    use polguard_source::NamedPolicy;
    use polguard_types::PolicyId;
    use serde_json::json;

    fn sample_report() -> ScanReport {
        let input = ScanInput {
            config_text: "",
            overrides: Overrides::default(),
            policies: vec![NamedPolicy {
                id: PolicyId::new("Admin", "arn:aws:iam::123456789012:policy/Admin"),
                document: json!({"Statement": [
                    {"Effect": "Deny", "Action": "*", "Resource": "*"},
                    {"Effect": "Allow", "Action": ["*"], "Resource": "arn:aws:s3:::b"}
                ]}),
            }],
        };
        run_scan(input).expect("run_scan").report
    }

    #[test]
    fn report_survives_serialization() {
        let report = sample_report();
        let bytes = serialize_report(&report).expect("serialize");
        let text = String::from_utf8(bytes).expect("utf8");
        assert!(text.contains("\"schema\": \"polguard.report.v1\""));
        let parsed = parse_report_json(&text).expect("parse");
        assert_eq!(parsed.verdict, report.verdict);
        assert_eq!(parsed.policies, report.policies);
        assert_eq!(parsed.data, report.data);
    }

    #[test]
    fn unknown_schema_is_rejected() {
        let err = parse_report_json(r#"{"schema": "other.report.v1"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown report schema"));
        assert!(parse_report_json("not json").is_err());
    }

    #[test]
    fn renderable_carries_statement_values() {
        let renderable = to_renderable(&sample_report());
        assert_eq!(renderable.verdict, RenderableVerdict::Fail);
        let finding = &renderable.policies[0].findings[0];
        assert_eq!(finding.statement_index, 1);
        assert_eq!(finding.rule_id, "WILDCARD_ACTION");
        assert_eq!(finding.risk, RenderableRisk::High);
        assert_eq!(finding.actions, vec!["*".to_string()]);
        assert_eq!(finding.resources, vec!["arn:aws:s3:::b".to_string()]);
    }
}
