use crate::{NamedPolicy, PolicySource, decode_document};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use polguard_types::PolicyId;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// A JSON file holding many named policies.
///
/// Accepted shapes:
/// - `[ { "PolicyName", "PolicyArn", "PolicyDocument" }, ... ]`
/// - `{ "Policies": [ ... ] }` (same entries)
///
/// ARNs must be unique within a bundle. An entry without `PolicyArn` is identified as
/// `<name>#<position>`.
#[derive(Clone, Debug)]
pub struct BundleSource {
    path: Utf8PathBuf,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BundleFile {
    List(Vec<BundleEntry>),
    Wrapped {
        #[serde(rename = "Policies")]
        policies: Vec<BundleEntry>,
    },
}

#[derive(Deserialize)]
struct BundleEntry {
    #[serde(rename = "PolicyName")]
    name: String,
    #[serde(rename = "PolicyArn", default)]
    arn: Option<String>,
    #[serde(rename = "PolicyDocument")]
    document: Value,
}

impl BundleSource {
    pub fn new(path: impl AsRef<Utf8Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse bundle text without touching the filesystem.
    pub fn parse(text: &str) -> anyhow::Result<Vec<NamedPolicy>> {
        let file: BundleFile = serde_json::from_str(text)
            .context("policy bundle must be an array of policies or an object with `Policies`")?;
        let entries = match file {
            BundleFile::List(entries) => entries,
            BundleFile::Wrapped { policies } => policies,
        };

        let mut seen: HashMap<String, (usize, String)> = HashMap::new();
        let mut policies = Vec::with_capacity(entries.len());
        for (position, entry) in entries.into_iter().enumerate() {
            let arn = entry
                .arn
                .unwrap_or_else(|| format!("{}#{position}", entry.name));
            if let Some((first, first_name)) = seen.get(&arn) {
                anyhow::bail!(
                    "duplicate PolicyArn {arn}: entry {first} ({first_name}) and entry {position} ({})",
                    entry.name
                );
            }
            seen.insert(arn.clone(), (position, entry.name.clone()));

            let document = decode_document(entry.document)
                .with_context(|| format!("policy {}", entry.name))?;
            policies.push(NamedPolicy {
                id: PolicyId::new(entry.name, arn),
                document,
            });
        }
        Ok(policies)
    }
}

impl PolicySource for BundleSource {
    fn describe(&self) -> String {
        format!("bundle {}", self.path)
    }

    fn policies(&self) -> anyhow::Result<Vec<NamedPolicy>> {
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("read policy bundle: {}", self.path))?;
        let policies =
            Self::parse(&text).with_context(|| format!("parse policy bundle: {}", self.path))?;
        log::debug!("loaded {} policies from {}", policies.len(), self.path);
        Ok(policies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_list_form_in_file_order() {
        let text = r#"[
            {
                "PolicyName": "TestRiskyPolicy",
                "PolicyArn": "arn:aws:iam::123456789012:policy/TestRiskyPolicy",
                "PolicyDocument": {"Statement": [{"Effect": "Allow", "Action": "*", "Resource": "*"}]}
            },
            {
                "PolicyName": "SafePolicy",
                "PolicyArn": "arn:aws:iam::123456789012:policy/SafePolicy",
                "PolicyDocument": {"Statement": []}
            }
        ]"#;
        let policies = BundleSource::parse(text).expect("parse");
        assert_eq!(policies.len(), 2);
        assert_eq!(policies[0].id.name, "TestRiskyPolicy");
        assert_eq!(
            policies[1].id.arn,
            "arn:aws:iam::123456789012:policy/SafePolicy"
        );
        assert_eq!(policies[1].document, json!({"Statement": []}));
    }

    #[test]
    fn parses_wrapped_form_and_derives_missing_arn_from_position() {
        let text = r#"{"Policies": [{"PolicyName": "NoArn", "PolicyDocument": "{\"Statement\": {}}"}]}"#;
        let policies = BundleSource::parse(text).expect("parse");
        assert_eq!(policies[0].id.arn, "NoArn#0");
        assert_eq!(policies[0].document, json!({"Statement": {}}));
    }

    #[test]
    fn same_named_entries_without_arn_stay_distinct() {
        let text = r#"[
            {"PolicyName": "Inline", "PolicyDocument": {"Statement": []}},
            {"PolicyName": "Inline", "PolicyDocument": {"Statement": []}}
        ]"#;
        let policies = BundleSource::parse(text).expect("parse");
        assert_eq!(policies[0].id.arn, "Inline#0");
        assert_eq!(policies[1].id.arn, "Inline#1");
    }

    #[test]
    fn rejects_duplicate_arns() {
        let text = r#"[
            {"PolicyName": "A", "PolicyArn": "arn:aws:iam::1:policy/p", "PolicyDocument": {}},
            {"PolicyName": "B", "PolicyArn": "arn:aws:iam::1:policy/p", "PolicyDocument": {}}
        ]"#;
        let err = BundleSource::parse(text).expect_err("duplicate arn");
        let message = format!("{err:#}");
        assert!(message.contains("duplicate PolicyArn arn:aws:iam::1:policy/p"), "{message}");
        assert!(message.contains("entry 0 (A) and entry 1 (B)"), "{message}");
    }

    #[test]
    fn explicit_arn_cannot_shadow_a_derived_one() {
        let text = r##"[
            {"PolicyName": "P", "PolicyDocument": {}},
            {"PolicyName": "Q", "PolicyArn": "P#0", "PolicyDocument": {}}
        ]"##;
        assert!(BundleSource::parse(text).is_err());
    }

    #[test]
    fn rejects_entries_without_document() {
        let text = r#"[{"PolicyName": "Broken"}]"#;
        assert!(BundleSource::parse(text).is_err());
    }

    #[test]
    fn reads_from_disk() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let path = Utf8PathBuf::from_path_buf(tmp.path().join("policies.json")).expect("utf8");
        std::fs::write(
            &path,
            r#"[{"PolicyName": "P", "PolicyArn": "arn:p", "PolicyDocument": {"Statement": []}}]"#,
        )
        .expect("write bundle");

        let source = BundleSource::new(&path);
        assert!(source.describe().contains("policies.json"));
        let policies = source.policies().expect("load");
        assert_eq!(policies.len(), 1);
    }
}
