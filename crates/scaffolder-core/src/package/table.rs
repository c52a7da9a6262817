//! Package table: optional package bundles the user can pick from
//!
//! Each choice is identified by a tag and expands to one or more dependency
//! entries. The table is loaded from the template's `template.yaml`:
//!
//! ```yaml
//! packages:
//!   - tag: mobx
//!     label: MobX - state management based on observable
//!     dependencies:
//!       - mobx:^3.3.1
//!       - name: mobx-react-devtools
//!         version: ^4.2.15
//!         category: development
//! ```

use crate::error::ScaffoldError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which dependency object an entry is written to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Runtime,
    #[serde(alias = "dev")]
    Development,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Runtime => write!(f, "runtime"),
            Category::Development => write!(f, "development"),
        }
    }
}

/// A single dependency contributed by a package choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEntry")]
pub struct DependencyEntry {
    pub name: String,
    pub version: String,
    pub category: Category,
}

impl DependencyEntry {
    pub fn runtime(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            category: Category::Runtime,
        }
    }

    pub fn development(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            category: Category::Development,
        }
    }
}

/// Parse the compact `name:range` / `name:range:dev` form
impl FromStr for DependencyEntry {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScaffoldError::InvalidDependency {
            entry: s.to_string(),
        };

        let mut parts = s.split(':');
        let name = parts.next().map(str::trim).filter(|n| !n.is_empty());
        let version = parts.next().map(str::trim).filter(|v| !v.is_empty());
        let category = match parts.next().map(str::trim) {
            None => Category::Runtime,
            Some("dev") | Some("development") => Category::Development,
            Some("runtime") => Category::Runtime,
            Some(_) => return Err(invalid()),
        };

        if parts.next().is_some() {
            return Err(invalid());
        }

        match (name, version) {
            (Some(name), Some(version)) => Ok(Self {
                name: name.to_string(),
                version: version.to_string(),
                category,
            }),
            _ => Err(invalid()),
        }
    }
}

/// YAML accepts either the compact string or a full mapping
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Compact(String),
    Full {
        name: String,
        version: String,
        #[serde(default)]
        category: Category,
    },
}

impl TryFrom<RawEntry> for DependencyEntry {
    type Error = ScaffoldError;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        match raw {
            RawEntry::Compact(s) => s.parse(),
            RawEntry::Full {
                name,
                version,
                category,
            } => Ok(Self {
                name,
                version,
                category,
            }),
        }
    }
}

/// One selectable package bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageChoice {
    /// Identifier used on the command line and in `variants.when`
    pub tag: String,

    /// Text shown in the selection prompt
    pub label: String,

    #[serde(default)]
    pub hint: Option<String>,

    pub dependencies: Vec<DependencyEntry>,
}

/// Immutable tag -> dependency entries table, in declared order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageTable {
    choices: Vec<PackageChoice>,
}

impl PackageTable {
    pub fn new(choices: Vec<PackageChoice>) -> Self {
        Self { choices }
    }

    pub fn choices(&self) -> &[PackageChoice] {
        &self.choices
    }

    pub fn get(&self, tag: &str) -> Option<&PackageChoice> {
        self.choices.iter().find(|c| c.tag == tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(|c| c.tag.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}
