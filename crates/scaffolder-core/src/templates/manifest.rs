//! Template manifest types and parsing

use crate::error::ScaffoldError;
use crate::package::PackageTable;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

/// Name of the manifest file at the template root and in each template directory
pub const MANIFEST_FILE: &str = "template.yaml";

/// Path segments starting with this marker are never copied verbatim
pub const RESERVED_MARKER: char = '_';

fn default_package_manifest() -> String {
    "_package.json".to_string()
}

/// Copies a template file, or every file under a template directory, to a new location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMapping {
    /// Path relative to the template root (file or directory)
    pub source: String,

    /// Path relative to the project root
    pub dest: String,
}

impl FileMapping {
    /// Both ends must be relative paths that stay inside the project
    pub fn validate(&self) -> Result<(), ScaffoldError> {
        for path in [&self.source, &self.dest] {
            if !is_contained(path) {
                return Err(ScaffoldError::UnsafePath { path: path.clone() });
            }
        }
        Ok(())
    }

    /// Destination for `path` if this mapping covers it
    pub fn map_path(&self, path: &str) -> Option<String> {
        let source = self.source.trim_end_matches('/');
        let dest = self.dest.trim_end_matches('/');

        if path == source {
            return Some(dest.to_string());
        }

        path.strip_prefix(source)
            .and_then(|rest| rest.strip_prefix('/'))
            .map(|rest| format!("{}/{}", dest, rest))
    }
}

/// Files chosen by whether a package tag was selected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Package tag that switches this variant on
    pub when: String,

    /// Mappings used when the tag is selected
    #[serde(default)]
    pub selected: Vec<FileMapping>,

    /// Mappings used when it is not
    #[serde(default)]
    pub otherwise: Vec<FileMapping>,
}

impl Variant {
    pub fn mappings(&self, tag_selected: bool) -> &[FileMapping] {
        if tag_selected {
            &self.selected
        } else {
            &self.otherwise
        }
    }
}

/// Root template manifest (templates/template.yaml)
/// Lists available template directories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootManifest {
    /// List of template directory names
    pub templates: Vec<String>,
}

/// Per-template manifest (templates/<name>/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Base package.json, merged with the selected packages
    #[serde(default = "default_package_manifest")]
    pub package_manifest: String,

    /// Optional package bundles offered to the user
    #[serde(default)]
    pub packages: PackageTable,

    /// Reserved files copied verbatim under a new name
    #[serde(default)]
    pub renamed: Vec<FileMapping>,

    /// Reserved files rendered with the template data
    #[serde(default)]
    pub rendered: Vec<FileMapping>,

    /// Reserved files picked by package selection
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl TemplateManifest {
    /// Every file mapping the manifest declares
    pub fn mappings(&self) -> impl Iterator<Item = &FileMapping> {
        self.renamed.iter().chain(&self.rendered).chain(
            self.variants
                .iter()
                .flat_map(|v| v.selected.iter().chain(&v.otherwise)),
        )
    }
}

/// Whether `path` is non-empty, relative and made only of plain segments
pub fn is_contained(path: &str) -> bool {
    let path = Path::new(path);
    !path.as_os_str().is_empty()
        && !path.has_root()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}

/// Whether `path` is copied as-is, i.e. has no reserved segment and is not the manifest
pub fn is_verbatim(path: &str) -> bool {
    path != MANIFEST_FILE
        && !path
            .split('/')
            .any(|segment| segment.starts_with(RESERVED_MARKER))
}
