//! Statement normalization: resolve author shorthand into one canonical shape.
//!
//! Everything downstream of [`normalize`] sees `Vec<Statement>` with set-valued fields and
//! never has to ask "is this a string or a list" again.

use crate::error::MalformedDocumentError;
use crate::model::{Effect, Statement, ValueSet};
use serde_json::{Map, Value};

const KEY_STATEMENT: &str = "Statement";
const KEY_SID: &str = "Sid";
const KEY_EFFECT: &str = "Effect";
const KEY_ACTION: &str = "Action";
const KEY_NOT_ACTION: &str = "NotAction";
const KEY_RESOURCE: &str = "Resource";
const KEY_NOT_RESOURCE: &str = "NotResource";
const KEY_CONDITION: &str = "Condition";

/// Normalize a raw policy document into its statements, in document order.
///
/// A single-object `Statement` is treated as a one-element array. An empty array yields an
/// empty result.
pub fn normalize(document: &Value) -> Result<Vec<Statement>, MalformedDocumentError> {
    let doc = document
        .as_object()
        .ok_or(MalformedDocumentError::NotAnObject)?;

    let raw = doc
        .get(KEY_STATEMENT)
        .ok_or(MalformedDocumentError::MissingStatement)?;

    match raw {
        Value::Object(obj) => Ok(vec![normalize_statement(0, obj)?]),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(obj) => normalize_statement(index, obj),
                other => Err(MalformedDocumentError::StatementNotObject {
                    index,
                    found: json_kind(other),
                }),
            })
            .collect(),
        other => Err(MalformedDocumentError::InvalidStatementShape {
            found: json_kind(other),
        }),
    }
}

fn normalize_statement(
    index: usize,
    raw: &Map<String, Value>,
) -> Result<Statement, MalformedDocumentError> {
    let effect = match raw.get(KEY_EFFECT) {
        None => Effect::Allow,
        Some(Value::String(s)) => {
            Effect::parse(s).ok_or_else(|| MalformedDocumentError::InvalidEffect {
                index,
                value: format!("{s:?}"),
            })?
        }
        Some(other) => {
            return Err(MalformedDocumentError::InvalidEffect {
                index,
                value: other.to_string(),
            });
        }
    };

    let sid = match raw.get(KEY_SID) {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            return Err(MalformedDocumentError::InvalidField {
                index,
                field: KEY_SID,
                detail: format!("expected a string, found {}", json_kind(other)),
            });
        }
    };

    let condition = match raw.get(KEY_CONDITION) {
        None => None,
        Some(v @ Value::Object(_)) => Some(v.clone()),
        Some(other) => {
            return Err(MalformedDocumentError::InvalidField {
                index,
                field: KEY_CONDITION,
                detail: format!("expected an object, found {}", json_kind(other)),
            });
        }
    };

    Ok(Statement {
        sid,
        effect,
        action: string_set(index, KEY_ACTION, raw.get(KEY_ACTION))?.unwrap_or_default(),
        not_action: string_set(index, KEY_NOT_ACTION, raw.get(KEY_NOT_ACTION))?,
        resource: string_set(index, KEY_RESOURCE, raw.get(KEY_RESOURCE))?.unwrap_or_default(),
        not_resource: string_set(index, KEY_NOT_RESOURCE, raw.get(KEY_NOT_RESOURCE))?,
        condition,
    })
}

/// `"x"` -> `{"x"}`, `["x", "y", "x"]` -> `{"x", "y"}`, absent -> `None`.
fn string_set(
    index: usize,
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<ValueSet>, MalformedDocumentError> {
    let Some(value) = value else {
        return Ok(None);
    };

    match value {
        Value::String(s) => Ok(Some(ValueSet::from([s.clone()]))),
        Value::Array(items) => {
            let mut set = ValueSet::new();
            for item in items {
                let Value::String(s) = item else {
                    return Err(MalformedDocumentError::InvalidField {
                        index,
                        field,
                        detail: format!("array entries must be strings, found {}", json_kind(item)),
                    });
                };
                set.insert(s.clone());
            }
            Ok(Some(set))
        }
        other => Err(MalformedDocumentError::InvalidField {
            index,
            field,
            detail: format!(
                "expected a string or an array of strings, found {}",
                json_kind(other)
            ),
        }),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
