use crate::model::join_values;
use crate::{NO_FINDINGS, REPORT_TITLE, RenderableReport};

pub fn render_html(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html>\n");
    out.push_str(&format!("<head><title>{}</title></head>\n", REPORT_TITLE));
    out.push_str("<body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", REPORT_TITLE));
    out.push_str(&format!(
        "<p>Verdict: <strong>{}</strong> | Policies scanned: {} | Findings: {} (reported) / {} (suppressed)</p>\n",
        report.verdict.label(),
        report.data.policies_scanned,
        report.data.findings_emitted,
        report.data.findings_suppressed
    ));

    if !report.has_findings() {
        out.push_str(&format!("<p>✅ {}</p>\n", NO_FINDINGS));
    }

    for policy in &report.policies {
        out.push_str(&format!("<h2>Policy: {}</h2>\n", escape(&policy.name)));
        out.push_str(&format!(
            "<p><strong>Policy ARN:</strong> {}</p>\n",
            escape(&policy.arn)
        ));

        if policy.findings.is_empty() {
            out.push_str("<p>No findings.</p>\n");
            continue;
        }

        out.push_str("<ul>\n");
        for f in &policy.findings {
            out.push_str(&format!(
                "<li>Statement: {} | Rule: <code>{}</code> | Action: <code>{}</code> | Resource: <code>{}</code> | Risk: <strong>{}</strong> | Reason: {}</li>\n",
                f.statement_index,
                escape(&f.rule_id),
                escape(&join_values(&f.actions)),
                escape(&join_values(&f.resources)),
                f.risk.label(),
                escape(&f.reason)
            ));
        }
        out.push_str("</ul>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{empty_report, risky_report};

    #[test]
    fn renders_empty_report_with_explicit_no_findings() {
        let html = render_html(&empty_report());
        assert!(html.contains("<h1>AWS Policy Analyzer Report</h1>"));
        assert!(html.contains("<p>✅ No risky policies found.</p>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn renders_findings_as_list_items() {
        let html = render_html(&risky_report());
        assert!(html.contains("<h2>Policy: TestRiskyPolicy</h2>"));
        assert_eq!(html.matches("<li>").count(), 2);
        assert!(html.contains("Rule: <code>WILDCARD_ALL</code>"));
        assert!(html.contains("Risk: <strong>High</strong>"));
    }

    #[test]
    fn escapes_markup_in_names() {
        let mut report = risky_report();
        report.policies[0].name = "<script>alert('x')</script>".to_string();
        let html = render_html(&report);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }
}
