//! In-memory template contents

use super::manifest::{TemplateManifest, MANIFEST_FILE};
use crate::error::ScaffoldError;
use anyhow::{Context, Result};
use std::collections::BTreeMap;

/// One template loaded into memory: its manifest and every file by relative path
#[derive(Debug, Clone)]
pub struct TemplateTree {
    pub name: String,
    pub manifest: TemplateManifest,
    files: BTreeMap<String, Vec<u8>>,
}

impl TemplateTree {
    /// Build a tree from raw files; `template.yaml` must be among them
    pub fn from_files(name: &str, files: BTreeMap<String, Vec<u8>>) -> Result<Self> {
        let raw = files
            .get(MANIFEST_FILE)
            .ok_or_else(|| anyhow::anyhow!("Template '{}' missing {}", name, MANIFEST_FILE))?;
        let manifest: TemplateManifest = serde_yaml::from_str(&String::from_utf8_lossy(raw))
            .with_context(|| format!("Failed to parse template '{}' manifest", name))?;

        for mapping in manifest.mappings() {
            mapping
                .validate()
                .with_context(|| format!("Invalid file mapping in template '{}'", name))?;
        }

        Ok(Self {
            name: name.to_string(),
            manifest,
            files,
        })
    }

    /// Relative paths of all files, sorted
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn file(&self, path: &str) -> Result<&[u8], ScaffoldError> {
        self.files
            .get(path)
            .map(Vec::as_slice)
            .ok_or_else(|| ScaffoldError::MissingTemplateFile {
                template: self.name.clone(),
                path: path.to_string(),
            })
    }

    pub fn file_str(&self, path: &str) -> Result<String> {
        let bytes = self.file(path)?;
        String::from_utf8(bytes.to_vec())
            .with_context(|| format!("Template file '{}' is not valid UTF-8", path))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = "name: T\ndescription: d\nversion: 0.1.0\n";

    #[test]
    fn test_from_files_parses_manifest() {
        let mut files = BTreeMap::new();
        files.insert(MANIFEST_FILE.to_string(), MANIFEST.as_bytes().to_vec());
        files.insert("a.txt".to_string(), b"hello".to_vec());

        let tree = TemplateTree::from_files("t", files).unwrap();

        assert_eq!(tree.manifest.name, "T");
        assert_eq!(tree.file_str("a.txt").unwrap(), "hello");
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_from_files_requires_manifest() {
        let mut files = BTreeMap::new();
        files.insert("a.txt".to_string(), b"hello".to_vec());
        assert!(TemplateTree::from_files("t", files).is_err());
    }

    #[test]
    fn test_missing_file_error() {
        let mut files = BTreeMap::new();
        files.insert(MANIFEST_FILE.to_string(), MANIFEST.as_bytes().to_vec());
        let tree = TemplateTree::from_files("t", files).unwrap();

        assert_eq!(
            tree.file("nope").unwrap_err(),
            ScaffoldError::MissingTemplateFile {
                template: "t".to_string(),
                path: "nope".to_string(),
            }
        );
    }

    #[test]
    fn test_from_files_rejects_escaping_mapping() {
        let manifest = format!(
            "{}renamed:\n  - {{ source: _gitignore, dest: ../.gitignore }}\n",
            MANIFEST
        );
        let mut files = BTreeMap::new();
        files.insert(MANIFEST_FILE.to_string(), manifest.into_bytes());
        files.insert("_gitignore".to_string(), b"node_modules".to_vec());

        let err = TemplateTree::from_files("t", files).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::UnsafePath { path }) if path == "../.gitignore"
        ));
    }
}
