use super::{Rule, finding};
use crate::model::Statement;
use polguard_types::{Finding, Risk, ids};

/// `Allow` combined with `NotResource`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowNotResourceRule;

impl Rule for AllowNotResourceRule {
    fn id(&self) -> &'static str {
        ids::RULE_ALLOW_NOT_RESOURCE
    }

    fn risk(&self) -> Risk {
        Risk::Medium
    }

    fn evaluate(&self, index: usize, statement: &Statement, out: &mut Vec<Finding>) {
        if statement.is_allow() && statement.not_resource.is_some() {
            out.push(finding(
                self,
                index,
                "Statement applies to every resource except those listed in `NotResource`",
            ));
        }
    }
}
