//! Risk rules.
//!
//! Every rule is a stateless unit struct implementing [`Rule`]. The registry order below is
//! part of the observable contract: findings for one statement are emitted in this order.

use crate::model::Statement;
use crate::policy::EffectiveConfig;
use polguard_types::{Finding, Risk};

mod allow_not_action;
mod allow_not_resource;
mod full_wildcard;
mod service_wildcard;
mod wildcard_action;
mod wildcard_resource;


pub use allow_not_action::AllowNotActionRule;
pub use allow_not_resource::AllowNotResourceRule;
pub use full_wildcard::FullWildcardRule;
pub use service_wildcard::ServiceWildcardRule;
pub use wildcard_action::WildcardActionRule;
pub use wildcard_resource::WildcardResourceRule;

/// A pure check over one normalized statement.
///
/// Implementations must not panic on well-formed input; a panic is a defect in the rule and
/// is not caught by the engine.
pub trait Rule: Send + Sync {
    fn id(&self) -> &'static str;

    fn risk(&self) -> Risk;

    /// Push zero or more findings for the statement at `index`.
    fn evaluate(&self, index: usize, statement: &Statement, out: &mut Vec<Finding>);
}

/// Build a finding attributed to `rule`.
pub(crate) fn finding(rule: &dyn Rule, index: usize, reason: impl Into<String>) -> Finding {
    Finding::new(index, rule.risk(), rule.id(), reason)
}

/// Rules enabled when no configuration is supplied.
pub fn builtin() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(WildcardActionRule),
        Box::new(WildcardResourceRule),
        Box::new(FullWildcardRule),
    ]
}

/// Every known rule, in registry order.
pub fn catalog() -> Vec<Box<dyn Rule>> {
    let mut rules = builtin();
    rules.push(Box::new(ServiceWildcardRule));
    rules.push(Box::new(AllowNotActionRule));
    rules.push(Box::new(AllowNotResourceRule));
    rules
}

/// The catalog filtered to the rules enabled in `cfg`, still in registry order.
pub fn enabled_in(cfg: &EffectiveConfig) -> Vec<Box<dyn Rule>> {
    catalog()
        .into_iter()
        .filter(|rule| cfg.is_enabled(rule.id()))
        .collect()
}
