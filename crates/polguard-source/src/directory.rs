use crate::{NamedPolicy, PolicySource, decode_document};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use polguard_types::PolicyId;
use walkdir::WalkDir;

/// A directory tree of `*.json` files, one bare policy document per file.
///
/// The policy name is the file stem and the ARN slot carries the path relative to the root
/// (forward slashes). Policies are returned sorted by that relative path.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: Utf8PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl AsRef<Utf8Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn discover(&self) -> anyhow::Result<Vec<(String, Utf8PathBuf)>> {
        let mut found = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(false) {
            let entry = entry.with_context(|| format!("walk {}", self.root))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(path) = Utf8Path::from_path(entry.path()) else {
                log::warn!("skipping non-UTF-8 path: {}", entry.path().display());
                continue;
            };
            if path.extension() != Some("json") {
                log::debug!("skipping non-JSON file: {path}");
                continue;
            }
            let rel = path
                .strip_prefix(&self.root)
                .unwrap_or(path)
                .as_str()
                .replace('\\', "/");
            found.push((rel, path.to_path_buf()));
        }
        found.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(found)
    }
}

impl PolicySource for DirectorySource {
    fn describe(&self) -> String {
        format!("directory {}", self.root)
    }

    fn policies(&self) -> anyhow::Result<Vec<NamedPolicy>> {
        let files = self.discover()?;
        if files.is_empty() {
            log::warn!("no *.json policy documents found under {}", self.root);
        }

        files
            .into_iter()
            .map(|(rel, path)| {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("read policy document: {path}"))?;
                let raw: serde_json::Value = serde_json::from_str(&text)
                    .with_context(|| format!("parse policy document: {path}"))?;
                let document = decode_document(raw)
                    .with_context(|| format!("parse policy document: {path}"))?;
                let name = path.file_stem().unwrap_or(rel.as_str()).to_string();
                Ok(NamedPolicy {
                    id: PolicyId::new(name, rel),
                    document,
                })
            })
            .collect()
    }
}
