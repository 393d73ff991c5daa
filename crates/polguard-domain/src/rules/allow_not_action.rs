use super::{Rule, finding};
use crate::model::Statement;
use polguard_types::{Finding, Risk, ids};

/// `Allow` combined with `NotAction`: everything except a list.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowNotActionRule;

impl Rule for AllowNotActionRule {
    fn id(&self) -> &'static str {
        ids::RULE_ALLOW_NOT_ACTION
    }

    fn risk(&self) -> Risk {
        Risk::Medium
    }

    fn evaluate(&self, index: usize, statement: &Statement, out: &mut Vec<Finding>) {
        if statement.is_allow() && statement.not_action.is_some() {
            out.push(finding(
                self,
                index,
                "Statement allows every action except those listed in `NotAction`",
            ));
        }
    }
}
