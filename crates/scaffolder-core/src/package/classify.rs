//! Split selected package bundles into runtime and development additions

use super::map::DependencyMap;
use super::table::{Category, PackageTable};
use crate::error::ScaffoldError;
use std::collections::BTreeSet;

/// Tags chosen by the user. Order is irrelevant and duplicates collapse.
pub type Selection = BTreeSet<String>;

/// Dependency additions per category, ready to be merged into a manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub runtime: DependencyMap,
    pub development: DependencyMap,
}

impl Classification {
    fn bucket_mut(&mut self, category: Category) -> &mut DependencyMap {
        match category {
            Category::Runtime => &mut self.runtime,
            Category::Development => &mut self.development,
        }
    }
}

/// Resolves selections against a fixed package table
#[derive(Debug, Clone)]
pub struct Classifier {
    table: PackageTable,
}

impl Classifier {
    pub fn new(table: PackageTable) -> Self {
        Self { table }
    }

    /// Classify the entries of every selected tag.
    ///
    /// Every tag must exist in the table. Choices are applied in table order,
    /// so when two selected bundles name the same dependency the one declared
    /// later wins.
    pub fn classify(&self, selection: &Selection) -> Result<Classification, ScaffoldError> {
        if let Some(unknown) = selection.iter().find(|tag| !self.table.contains(tag)) {
            return Err(ScaffoldError::UnknownTag {
                tag: unknown.clone(),
                known: self.table.tags().collect::<Vec<_>>().join(", "),
            });
        }

        let mut result = Classification::default();

        for choice in self.table.choices() {
            if !selection.contains(&choice.tag) {
                continue;
            }
            for entry in &choice.dependencies {
                if let Some(previous) = result.bucket_mut(entry.category).get(&entry.name) {
                    if previous != entry.version {
                        tracing::debug!(
                            dependency = %entry.name,
                            category = %entry.category,
                            previous = %previous,
                            version = %entry.version,
                            tag = %choice.tag,
                            "overriding dependency version from earlier package choice"
                        );
                    }
                }
                result
                    .bucket_mut(entry.category)
                    .insert(entry.name.as_str(), entry.version.as_str());
            }
        }

        tracing::debug!(
            runtime = result.runtime.len(),
            development = result.development.len(),
            "classified package selection"
        );

        Ok(result)
    }
}
