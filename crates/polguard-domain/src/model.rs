use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// Normalized string set for `Action`/`Resource` values.
///
/// Sorted so that iteration order never depends on the author's ordering.
pub type ValueSet = BTreeSet<String>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Effect {
    #[default]
    Allow,
    Deny,
}

impl Effect {
    pub fn as_str(self) -> &'static str {
        match self {
            Effect::Allow => "Allow",
            Effect::Deny => "Deny",
        }
    }

    /// Exact-case parse; policy grammar does not accept `allow`.
    pub fn parse(v: &str) -> Option<Self> {
        match v {
            "Allow" => Some(Effect::Allow),
            "Deny" => Some(Effect::Deny),
            _ => None,
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One access-control statement in canonical shape.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Statement {
    pub sid: Option<String>,
    pub effect: Effect,

    /// Empty when the statement has no `Action` key. Never treated as a wildcard.
    pub action: ValueSet,
    pub not_action: Option<ValueSet>,

    /// Empty when the statement has no `Resource` key.
    pub resource: ValueSet,
    pub not_resource: Option<ValueSet>,

    /// Opaque JSON object; rules do not interpret it.
    pub condition: Option<Value>,
}

impl Statement {
    pub fn is_allow(&self) -> bool {
        self.effect == Effect::Allow
    }

    pub fn has_action(&self, action: &str) -> bool {
        self.action.contains(action)
    }

    pub fn has_resource(&self, resource: &str) -> bool {
        self.resource.contains(resource)
    }
}
