//! Explain registry for rules.
//!
//! Maps rule IDs to human-readable explanations with remediation guidance.

use crate::ids;
use crate::receipt::Risk;

/// Explanation entry for a rule.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Canonical rule identifier.
    pub rule_id: &'static str,
    /// Short description of the rule.
    pub title: &'static str,
    /// Risk attached to every finding of the rule.
    pub risk: Risk,
    /// Enabled by the `default` profile; otherwise only `strict` turns it on.
    pub default_enabled: bool,
    /// What the rule detects and why it matters.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after policy statements.
    pub examples: ExamplePair,
}

/// Before and after policy examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Statement that would trigger a finding.
    pub before: &'static str,
    /// Statement that passes the rule.
    pub after: &'static str,
}

/// Look up an explanation by rule ID.
///
/// Matching is case-insensitive so `wildcard_action` works on the command line.
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    let id = identifier.trim().to_ascii_uppercase();
    match id.as_str() {
        ids::RULE_WILDCARD_ACTION => Some(explain_wildcard_action()),
        ids::RULE_WILDCARD_RESOURCE => Some(explain_wildcard_resource()),
        ids::RULE_WILDCARD_ALL => Some(explain_wildcard_all()),
        ids::RULE_SERVICE_WILDCARD => Some(explain_service_wildcard()),
        ids::RULE_ALLOW_NOT_ACTION => Some(explain_allow_not_action()),
        ids::RULE_ALLOW_NOT_RESOURCE => Some(explain_allow_not_resource()),
        _ => None,
    }
}

/// List all known rule IDs, in registry order.
pub fn all_rule_ids() -> &'static [&'static str] {
    &[
        ids::RULE_WILDCARD_ACTION,
        ids::RULE_WILDCARD_RESOURCE,
        ids::RULE_WILDCARD_ALL,
        ids::RULE_SERVICE_WILDCARD,
        ids::RULE_ALLOW_NOT_ACTION,
        ids::RULE_ALLOW_NOT_RESOURCE,
    ]
}

fn explain_wildcard_action() -> Explanation {
    Explanation {
        rule_id: ids::RULE_WILDCARD_ACTION,
        title: "Wildcard Action",
        risk: Risk::High,
        default_enabled: true,
        description: "\
Detects Allow statements whose `Action` contains the literal `*`.

A statement granting every action lets the principal call any API of any service,
including IAM itself, which is a direct path to privilege escalation.

Service-scoped wildcards such as `s3:*` do not trigger this rule; see SERVICE_WILDCARD.
Deny statements are never flagged.",
        remediation: "\
List the specific actions the workload calls. Start from access logs or a generated
baseline policy and remove everything the workload does not use.",
        examples: ExamplePair {
            before: r#"{ "Effect": "Allow", "Action": "*", "Resource": "arn:aws:s3:::reports" }"#,
            after: r#"{ "Effect": "Allow", "Action": ["s3:GetObject", "s3:ListBucket"], "Resource": "arn:aws:s3:::reports" }"#,
        },
    }
}

fn explain_wildcard_resource() -> Explanation {
    Explanation {
        rule_id: ids::RULE_WILDCARD_RESOURCE,
        title: "Wildcard Resource",
        risk: Risk::High,
        default_enabled: true,
        description: "\
Detects Allow statements whose `Resource` contains the literal `*`.

The granted actions then apply to every resource in the account, including resources
created later.",
        remediation: "\
Scope `Resource` to the ARNs the workload touches. Use ARN prefixes with path wildcards
(for example `arn:aws:s3:::reports/*`) rather than the bare `*`.",
        examples: ExamplePair {
            before: r#"{ "Effect": "Allow", "Action": "s3:GetObject", "Resource": "*" }"#,
            after: r#"{ "Effect": "Allow", "Action": "s3:GetObject", "Resource": "arn:aws:s3:::reports/*" }"#,
        },
    }
}

fn explain_wildcard_all() -> Explanation {
    Explanation {
        rule_id: ids::RULE_WILDCARD_ALL,
        title: "Full Wildcard Grant",
        risk: Risk::Critical,
        default_enabled: true,
        description: "\
Detects Allow statements where both `Action` and `Resource` contain `*`.

This is administrator access. It is reported in addition to WILDCARD_ACTION and
WILDCARD_RESOURCE so the most severe case can be sorted and filtered on its own.",
        remediation: "\
Replace the statement with scoped grants. If administrator access is genuinely needed,
attach the managed AdministratorAccess policy to a dedicated break-glass role instead.",
        examples: ExamplePair {
            before: r#"{ "Effect": "Allow", "Action": "*", "Resource": "*" }"#,
            after: r#"{ "Effect": "Allow", "Action": "ec2:DescribeInstances", "Resource": "*" }"#,
        },
    }
}

fn explain_service_wildcard() -> Explanation {
    Explanation {
        rule_id: ids::RULE_SERVICE_WILDCARD,
        title: "Service-Wide Wildcard Action",
        risk: Risk::Medium,
        default_enabled: false,
        description: "\
Detects Allow statements granting every action of one service, such as `s3:*` or `iam:*`.

Service wildcards include destructive and permission-management actions the workload
rarely needs.",
        remediation: "\
Replace `<service>:*` with the specific actions used, or with a narrower prefix such as
`s3:Get*`.",
        examples: ExamplePair {
            before: r#"{ "Effect": "Allow", "Action": "s3:*", "Resource": "arn:aws:s3:::reports/*" }"#,
            after: r#"{ "Effect": "Allow", "Action": "s3:Get*", "Resource": "arn:aws:s3:::reports/*" }"#,
        },
    }
}

fn explain_allow_not_action() -> Explanation {
    Explanation {
        rule_id: ids::RULE_ALLOW_NOT_ACTION,
        title: "Allow With NotAction",
        risk: Risk::Medium,
        default_enabled: false,
        description: "\
Detects Allow statements that use `NotAction`.

`Allow` + `NotAction` grants every action except the listed ones, including actions
added to AWS after the policy was written.",
        remediation: "\
Rewrite the statement as an explicit `Action` list. Use `NotAction` only together with
`Effect: Deny`.",
        examples: ExamplePair {
            before: r#"{ "Effect": "Allow", "NotAction": "iam:*", "Resource": "*" }"#,
            after: r#"{ "Effect": "Allow", "Action": ["ec2:Describe*", "s3:GetObject"], "Resource": "*" }"#,
        },
    }
}

fn explain_allow_not_resource() -> Explanation {
    Explanation {
        rule_id: ids::RULE_ALLOW_NOT_RESOURCE,
        title: "Allow With NotResource",
        risk: Risk::Medium,
        default_enabled: false,
        description: "\
Detects Allow statements that use `NotResource`.

`Allow` + `NotResource` applies the grant to every resource except the listed ones,
including resources created later.",
        remediation: "\
Rewrite the statement with an explicit `Resource` list.",
        examples: ExamplePair {
            before: r#"{ "Effect": "Allow", "Action": "s3:GetObject", "NotResource": "arn:aws:s3:::secrets/*" }"#,
            after: r#"{ "Effect": "Allow", "Action": "s3:GetObject", "Resource": "arn:aws:s3:::reports/*" }"#,
        },
    }
}
