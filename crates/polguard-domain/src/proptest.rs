//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Shorthand normalization equivalence
//! - Findings only for literal wildcards
//! - Deterministic, order-stable evaluation

use crate::engine::{RuleEngine, evaluate};
use crate::normalize::normalize;
use crate::rules;
use polguard_types::{Risk, ids};
use proptest::prelude::*;
use serde_json::{Value, json};

// ============================================================================
// Strategies
// ============================================================================

/// Scoped action names such as `s3:GetObject` (never the bare wildcard).
fn arb_scoped_action() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("[a-z][a-z0-9]{1,8}:[A-Z][A-Za-z]{1,16}").unwrap(),
        prop::string::string_regex("[a-z][a-z0-9]{1,8}:\\*").unwrap(),
        prop::string::string_regex("[a-z][a-z0-9]{1,8}:Get\\*").unwrap(),
    ]
}

/// Scoped resource ARNs (never the bare wildcard).
fn arb_scoped_resource() -> impl Strategy<Value = String> {
    prop::string::string_regex("arn:aws:[a-z0-9]{2,8}:::[a-z0-9-]{1,12}(/\\*)?").unwrap()
}

/// A field value in either author shorthand: single string or array of strings.
fn arb_field(values: Vec<String>, as_string: bool) -> Value {
    if as_string && values.len() == 1 {
        json!(values[0])
    } else {
        json!(values)
    }
}

fn arb_effect() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("Allow"), Just("Deny")]
}

fn arb_statement(with_wildcards: bool) -> impl Strategy<Value = Value> {
    let action = if with_wildcards {
        prop_oneof![arb_scoped_action(), Just("*".to_string())].boxed()
    } else {
        arb_scoped_action().boxed()
    };
    let resource = if with_wildcards {
        prop_oneof![arb_scoped_resource(), Just("*".to_string())].boxed()
    } else {
        arb_scoped_resource().boxed()
    };

    (
        arb_effect(),
        prop::collection::vec(action, 0..4),
        prop::collection::vec(resource, 0..4),
        any::<bool>(),
    )
        .prop_map(|(effect, actions, resources, shorthand)| {
            json!({
                "Effect": effect,
                "Action": arb_field(actions, shorthand),
                "Resource": arb_field(resources, shorthand),
            })
        })
}

fn arb_document(with_wildcards: bool) -> impl Strategy<Value = Value> {
    prop::collection::vec(arb_statement(with_wildcards), 0..6)
        .prop_map(|statements| json!({ "Version": "2012-10-17", "Statement": statements }))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn no_literal_wildcard_means_no_builtin_findings(doc in arb_document(false)) {
        let statements = normalize(&doc).expect("generated documents are well-formed");
        prop_assert!(evaluate(&statements).is_empty());
    }

    #[test]
    fn single_statement_shorthand_is_equivalent(stmt in arb_statement(true)) {
        let shorthand = normalize(&json!({ "Statement": stmt.clone() })).expect("normalize");
        let wrapped = normalize(&json!({ "Statement": [stmt] })).expect("normalize");
        prop_assert_eq!(shorthand, wrapped);
    }

    #[test]
    fn evaluation_is_idempotent(doc in arb_document(true)) {
        let statements = normalize(&doc).expect("normalize");
        let engine = RuleEngine::new(rules::catalog());
        prop_assert_eq!(engine.evaluate(&statements), engine.evaluate(&statements));
    }

    #[test]
    fn normalization_preserves_statement_count(doc in arb_document(true)) {
        let expected = doc["Statement"].as_array().map(Vec::len).unwrap_or(0);
        let statements = normalize(&doc).expect("normalize");
        prop_assert_eq!(statements.len(), expected);
    }

    #[test]
    fn findings_are_ordered_by_statement_index(doc in arb_document(true)) {
        let statements = normalize(&doc).expect("normalize");
        let findings = RuleEngine::new(rules::catalog()).evaluate(&statements);
        for pair in findings.windows(2) {
            prop_assert!(pair[0].statement_index <= pair[1].statement_index);
        }
        for f in &findings {
            prop_assert!(f.statement_index < statements.len());
        }
    }

    #[test]
    fn full_wildcard_implies_both_single_field_findings(doc in arb_document(true)) {
        let statements = normalize(&doc).expect("normalize");
        let findings = evaluate(&statements);
        for f in findings.iter().filter(|f| f.rule_id == ids::RULE_WILDCARD_ALL) {
            prop_assert_eq!(f.risk, Risk::Critical);
            let same: Vec<_> = findings
                .iter()
                .filter(|g| g.statement_index == f.statement_index)
                .map(|g| g.rule_id.as_str())
                .collect();
            prop_assert!(same.contains(&ids::RULE_WILDCARD_ACTION));
            prop_assert!(same.contains(&ids::RULE_WILDCARD_RESOURCE));
        }
    }

    #[test]
    fn builtin_findings_only_for_allow_statements(doc in arb_document(true)) {
        let statements = normalize(&doc).expect("normalize");
        for f in evaluate(&statements) {
            prop_assert!(statements[f.statement_index].is_allow());
        }
    }

    #[test]
    fn duplicate_entries_collapse(action in arb_scoped_action(), copies in 1usize..5) {
        let doc = json!({ "Statement": { "Action": vec![action.clone(); copies] } });
        let statements = normalize(&doc).expect("normalize");
        prop_assert_eq!(statements[0].action.len(), 1);
        prop_assert!(statements[0].has_action(&action));
    }
}
