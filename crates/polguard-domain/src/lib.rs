//! Pure policy evaluation (no IO).
//!
//! Input: a raw policy document supplied by a policy source.
//! Output: normalized statements, then findings per statement and rule.

#![forbid(unsafe_code)]

pub mod error;
pub mod fingerprint;
pub mod model;
pub mod normalize;
pub mod policy;
pub mod report;
pub mod rules;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{RuleEngine, evaluate};
pub use error::MalformedDocumentError;
pub use normalize::normalize;
