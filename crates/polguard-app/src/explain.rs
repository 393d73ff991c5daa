//! The `explain` use case: look up rule documentation.

use std::fmt::Write as _;

use polguard_settings::{DEFAULT_PROFILE, STRICT_PROFILE};
use polguard_types::explain::{self, Explanation};

/// Result of looking up a rule id.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Explanation),
    /// The id matched nothing; carries the ids that would have.
    NotFound {
        identifier: String,
        available_rule_ids: &'static [&'static str],
    },
}

/// Look up an explanation for a rule id.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.trim().to_string(),
            available_rule_ids: explain::all_rule_ids(),
        },
    }
}

/// Profiles that turn the rule on, in the order users usually reach for them.
fn enabling_profiles(exp: &Explanation) -> Vec<&'static str> {
    if exp.default_enabled {
        vec![DEFAULT_PROFILE, STRICT_PROFILE]
    } else {
        vec![STRICT_PROFILE]
    }
}

/// Terminal rendering of one rule.
///
/// ```text
/// WILDCARD_ALL: Full Wildcard Grant
/// Risk: Critical | Enabled in: default, strict
///
/// <description>
///
/// How to fix:
///   <remediation>
///
/// Flagged statement:
///   {...}
/// Scoped statement:
///   {...}
/// ```
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}: {}", exp.rule_id, exp.title);
    let _ = writeln!(
        out,
        "Risk: {} | Enabled in: {}",
        exp.risk,
        enabling_profiles(exp).join(", ")
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", exp.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "How to fix:");
    push_indented(&mut out, exp.remediation);
    let _ = writeln!(out);
    let _ = writeln!(out, "Flagged statement:");
    push_indented(&mut out, exp.examples.before);
    let _ = writeln!(out, "Scoped statement:");
    push_indented(&mut out, exp.examples.after);

    out
}

fn push_indented(out: &mut String, text: &str) {
    for line in text.lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            let _ = writeln!(out, "  {line}");
        }
    }
}

/// Message for an unknown rule id, listing what is available.
pub fn format_not_found(identifier: &str, rule_ids: &[&'static str]) -> String {
    let mut out = format!("Unknown rule id: {identifier}\n\nAvailable rule ids:\n");
    for id in rule_ids {
        let _ = writeln!(out, "  - {id}");
    }
    out
}
