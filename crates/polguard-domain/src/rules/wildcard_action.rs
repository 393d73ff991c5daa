use super::{Rule, finding};
use crate::model::Statement;
use polguard_types::{Finding, Risk, ids};

/// `Allow` with `"*"` in `Action`.
///
/// Service wildcards such as `"s3:*"` are left to [`super::ServiceWildcardRule`].
#[derive(Clone, Copy, Debug, Default)]
pub struct WildcardActionRule;

impl Rule for WildcardActionRule {
    fn id(&self) -> &'static str {
        ids::RULE_WILDCARD_ACTION
    }

    fn risk(&self) -> Risk {
        Risk::High
    }

    fn evaluate(&self, index: usize, statement: &Statement, out: &mut Vec<Finding>) {
        if statement.is_allow() && statement.has_action(ids::WILDCARD) {
            out.push(finding(self, index, "Statement grants all actions (`*`)"));
        }
    }
}
