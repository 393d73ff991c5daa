//! Policy source adapters: read named policy documents from local files.
//!
//! This crate is allowed to do filesystem IO. It never evaluates anything; documents are
//! handed to the engine as raw JSON values so malformed shapes are reported by the
//! normalizer, not here.

#![forbid(unsafe_code)]

mod bundle;
mod directory;

use anyhow::Context;
use camino::Utf8Path;
use polguard_types::PolicyId;
use serde_json::Value;

pub use bundle::BundleSource;
pub use directory::DirectorySource;

/// One policy as supplied by a source: identifier pair plus raw document.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedPolicy {
    pub id: PolicyId,
    pub document: Value,
}

/// Supplies the policies of one scan, in a deterministic order.
pub trait PolicySource {
    /// Short human-readable description for logs.
    fn describe(&self) -> String;

    fn policies(&self) -> anyhow::Result<Vec<NamedPolicy>>;
}

/// Pick the adapter for `path`: a directory of documents or a bundle file.
pub fn source_for_path(path: &Utf8Path) -> anyhow::Result<Box<dyn PolicySource>> {
    let meta = std::fs::metadata(path).with_context(|| format!("stat input: {path}"))?;
    if meta.is_dir() {
        Ok(Box::new(DirectorySource::new(path)))
    } else {
        Ok(Box::new(BundleSource::new(path)))
    }
}

/// Parse a document that is either inline JSON or a JSON-encoded string.
///
/// Some exporters store `PolicyDocument` as a string; both forms are accepted.
pub(crate) fn decode_document(raw: Value) -> anyhow::Result<Value> {
    match raw {
        Value::String(text) => {
            serde_json::from_str(&text).context("parse string-encoded policy document")
        }
        other => Ok(other),
    }
}
