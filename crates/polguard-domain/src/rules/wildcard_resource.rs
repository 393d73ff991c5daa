use super::{Rule, finding};
use crate::model::Statement;
use polguard_types::{Finding, Risk, ids};

/// `Allow` with `"*"` in `Resource`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WildcardResourceRule;

impl Rule for WildcardResourceRule {
    fn id(&self) -> &'static str {
        ids::RULE_WILDCARD_RESOURCE
    }

    fn risk(&self) -> Risk {
        Risk::High
    }

    fn evaluate(&self, index: usize, statement: &Statement, out: &mut Vec<Finding>) {
        if statement.is_allow() && statement.has_resource(ids::WILDCARD) {
            out.push(finding(self, index, "Statement applies to all resources (`*`)"));
        }
    }
}
