//! Package manifest generation
//!
//! This module provides:
//! - The package table (tag -> dependency entries) and its classifier
//! - An explicitly ordered dependency map
//! - The package.json document and the merge that produces it

pub mod classify;
pub mod document;
pub mod map;
pub mod table;

pub use classify::{Classification, Classifier, Selection};
pub use document::{merge, merge_classified, ManifestDocument};
pub use map::DependencyMap;
pub use table::{Category, DependencyEntry, PackageChoice, PackageTable};
