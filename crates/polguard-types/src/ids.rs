//! Stable identifiers for rules.
//!
//! Rule IDs are SCREAMING_SNAKE_CASE and part of the observable contract: sinks sort and
//! filter on them, so never rename one.

// Built-in rules (default profile)
pub const RULE_WILDCARD_ACTION: &str = "WILDCARD_ACTION";
pub const RULE_WILDCARD_RESOURCE: &str = "WILDCARD_RESOURCE";
pub const RULE_WILDCARD_ALL: &str = "WILDCARD_ALL";

// Opt-in rules (strict profile)
pub const RULE_SERVICE_WILDCARD: &str = "SERVICE_WILDCARD";
pub const RULE_ALLOW_NOT_ACTION: &str = "ALLOW_NOT_ACTION";
pub const RULE_ALLOW_NOT_RESOURCE: &str = "ALLOW_NOT_RESOURCE";

/// The literal token meaning "every value" in `Action` and `Resource`.
pub const WILDCARD: &str = "*";
