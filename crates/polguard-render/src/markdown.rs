use crate::model::join_values;
use crate::{NO_FINDINGS, REPORT_TITLE, RenderableReport};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", REPORT_TITLE));
    out.push_str(&format!(
        "- Verdict: **{}**\n- Profile: {}\n- Policies scanned: {}\n- Findings: {} (reported) / {} (suppressed)\n\n",
        report.verdict.label(),
        code_span(&report.data.profile),
        report.data.policies_scanned,
        report.data.findings_emitted,
        report.data.findings_suppressed
    ));

    if !report.has_findings() {
        out.push_str(&format!("✅ {}\n", NO_FINDINGS));
    }

    for policy in &report.policies {
        out.push_str(&format!("## Policy: {}\n\n", policy.name));
        out.push_str(&format!("**Policy ARN:** {}\n\n", code_span(&policy.arn)));

        if policy.findings.is_empty() {
            out.push_str("No findings.\n\n");
            continue;
        }

        for f in &policy.findings {
            out.push_str(&format!("- Statement: {}\n", f.statement_index));
            out.push_str(&format!("- Rule: {}\n", code_span(&f.rule_id)));
            out.push_str(&format!("- Action: {}\n", code_span(&join_values(&f.actions))));
            out.push_str(&format!("- Resource: {}\n", code_span(&join_values(&f.resources))));
            out.push_str(&format!("- Risk: **{}**\n", f.risk.label()));
            out.push_str(&format!("- Reason: {}\n\n", f.reason));
        }
    }

    out
}

/// Inline code span that survives backticks in the value: the fence is one backtick longer
/// than the longest run inside, and a value touching the fence gets padded with spaces.
fn code_span(value: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in value.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }

    let fence = "`".repeat(longest + 1);
    if value.starts_with('`') || value.ends_with('`') {
        format!("{fence} {value} {fence}")
    } else {
        format!("{fence}{value}{fence}")
    }
}
