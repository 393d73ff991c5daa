use crate::model::join_values;
use crate::{NO_FINDINGS, RenderableReport};

const HEADER: [&str; 8] = [
    "PolicyName",
    "PolicyArn",
    "StatementIndex",
    "RuleId",
    "Action",
    "Resource",
    "Risk",
    "Reason",
];

/// One row per finding. An empty report gets a single sentinel row so consumers can tell
/// "nothing found" from "nothing written".
pub fn render_csv(report: &RenderableReport) -> String {
    let mut out = String::new();
    push_row(&mut out, &HEADER);

    if !report.has_findings() {
        push_row(&mut out, &["None", "None", "", "", "", "", "None", NO_FINDINGS]);
        return out;
    }

    for policy in &report.policies {
        for f in &policy.findings {
            let index = f.statement_index.to_string();
            let actions = join_values(&f.actions);
            let resources = join_values(&f.resources);
            push_row(
                &mut out,
                &[
                    policy.name.as_str(),
                    policy.arn.as_str(),
                    index.as_str(),
                    f.rule_id.as_str(),
                    actions.as_str(),
                    resources.as_str(),
                    f.risk.label(),
                    f.reason.as_str(),
                ],
            );
        }
    }

    out
}

fn push_row(out: &mut String, fields: &[&str]) {
    let row: Vec<String> = fields.iter().map(|f| quote(f)).collect();
    out.push_str(&row.join(","));
    out.push_str("\r\n");
}

/// RFC 4180 quoting: wrap when the field holds a delimiter, quote or line break.
fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
