use thiserror::Error;

/// The input document violates the policy document shape.
///
/// Never swallowed: skipping a malformed policy would hide a security-relevant document
/// from analysis.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MalformedDocumentError {
    #[error("policy document must be a JSON object")]
    NotAnObject,

    #[error("policy document has no `Statement` field")]
    MissingStatement,

    #[error("`Statement` must be an object or an array of objects, found {found}")]
    InvalidStatementShape { found: &'static str },

    #[error("statement {index} must be an object, found {found}")]
    StatementNotObject { index: usize, found: &'static str },

    #[error("statement {index} has unrecognized `Effect` value {value}")]
    InvalidEffect { index: usize, value: String },

    #[error("statement {index} has an invalid `{field}` value: {detail}")]
    InvalidField {
        index: usize,
        field: &'static str,
        detail: String,
    },
}

impl MalformedDocumentError {
    /// Statement position the error refers to, when it refers to one.
    pub fn statement_index(&self) -> Option<usize> {
        match self {
            MalformedDocumentError::StatementNotObject { index, .. }
            | MalformedDocumentError::InvalidEffect { index, .. }
            | MalformedDocumentError::InvalidField { index, .. } => Some(*index),
            _ => None,
        }
    }
}
