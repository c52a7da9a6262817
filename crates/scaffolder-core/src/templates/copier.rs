//! Project generation from a loaded template
//!
//! Planning is pure: it decides every output path and its contents, including
//! the merged package.json. Writing is a separate step that only touches disk.

use super::manifest::{is_contained, is_verbatim, FileMapping};
use super::render::{render, TemplateData};
use super::tree::TemplateTree;
use crate::config::Answers;
use crate::error::ScaffoldError;
use crate::package::{merge_classified, Classifier, ManifestDocument};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

/// Output path of the merged manifest, relative to the project root
pub const PACKAGE_JSON: &str = "package.json";

/// Everything a generation run will write
#[derive(Debug, Clone)]
pub struct ProjectPlan {
    /// Relative output path -> contents, sorted by path
    pub files: BTreeMap<String, Vec<u8>>,

    /// The manifest serialized into `package.json`
    pub manifest: ManifestDocument,
}

impl ProjectPlan {
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

/// Decide the full output of a generation run
pub fn plan_project(
    tree: &TemplateTree,
    classifier: &Classifier,
    answers: &Answers,
) -> Result<ProjectPlan> {
    let manifest = &tree.manifest;
    let mut files: BTreeMap<String, Vec<u8>> = BTreeMap::new();

    for path in tree.paths().filter(|p| is_verbatim(p)) {
        files.insert(path.to_string(), tree.file(path)?.to_vec());
    }

    for mapping in &manifest.renamed {
        copy_mapping(tree, mapping, &mut files)?;
    }

    let data = TemplateData::from_app_name(&answers.app_name);
    for mapping in &manifest.rendered {
        let content = tree.file_str(&mapping.source)?;
        let rendered = render(&content, &data, &mapping.source)?;
        files.insert(mapping.dest.clone(), rendered.into_bytes());
    }

    for variant in &manifest.variants {
        if !manifest.packages.contains(&variant.when) {
            return Err(ScaffoldError::UnknownTag {
                tag: variant.when.clone(),
                known: manifest.packages.tags().collect::<Vec<_>>().join(", "),
            }
            .into());
        }
        let selected = answers.selection.contains(&variant.when);
        for mapping in variant.mappings(selected) {
            copy_mapping(tree, mapping, &mut files)?;
        }
    }

    let base = ManifestDocument::from_json(
        &tree.file_str(&manifest.package_manifest)?,
        &manifest.package_manifest,
    )?;
    let additions = classifier.classify(&answers.selection)?;
    let merged = merge_classified(&base, &answers.app_name, &additions);
    let json = merged
        .to_json_pretty()
        .context("Failed to serialize package.json")?;
    files.insert(PACKAGE_JSON.to_string(), json.into_bytes());

    Ok(ProjectPlan {
        files,
        manifest: merged,
    })
}

/// Copy every template file the mapping covers; a mapping that covers nothing is an error
fn copy_mapping(
    tree: &TemplateTree,
    mapping: &FileMapping,
    files: &mut BTreeMap<String, Vec<u8>>,
) -> Result<()> {
    let mut matched = false;
    for path in tree.paths() {
        if let Some(dest) = mapping.map_path(path) {
            files.insert(dest, tree.file(path)?.to_vec());
            matched = true;
        }
    }

    if !matched {
        return Err(ScaffoldError::MissingTemplateFile {
            template: tree.name.clone(),
            path: mapping.source.clone(),
        }
        .into());
    }
    Ok(())
}

/// Write a plan under `target_dir`, returning the relative paths written.
///
/// Any failure aborts the run; files already written are left in place.
/// Paths that would land outside `target_dir` are rejected.
pub async fn write_project(plan: &ProjectPlan, target_dir: &Path) -> Result<Vec<String>> {
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let mut written = Vec::with_capacity(plan.files.len());

    for (relative, contents) in &plan.files {
        if !is_contained(relative) {
            return Err(ScaffoldError::UnsafePath {
                path: relative.clone(),
            }
            .into());
        }

        let target_path = target_dir.join(relative);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&target_path, contents)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
        tracing::debug!(path = %target_path.display(), bytes = contents.len(), "wrote file");

        written.push(relative.clone());
    }

    Ok(written)
}
