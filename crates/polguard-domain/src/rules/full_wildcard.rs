use super::{Rule, finding};
use crate::model::Statement;
use polguard_types::{Finding, Risk, ids};

/// `Allow` with `"*"` in both `Action` and `Resource`.
///
/// Reported in addition to the two single-field findings, never instead of them.
#[derive(Clone, Copy, Debug, Default)]
pub struct FullWildcardRule;

impl Rule for FullWildcardRule {
    fn id(&self) -> &'static str {
        ids::RULE_WILDCARD_ALL
    }

    fn risk(&self) -> Risk {
        Risk::Critical
    }

    fn evaluate(&self, index: usize, statement: &Statement, out: &mut Vec<Finding>) {
        if statement.is_allow()
            && statement.has_action(ids::WILDCARD)
            && statement.has_resource(ids::WILDCARD)
        {
            out.push(finding(
                self,
                index,
                "Statement grants all actions on all resources (`*`)",
            ));
        }
    }
}
