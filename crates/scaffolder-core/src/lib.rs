//! Scaffolder Core - Shared library for web app scaffolding CLIs
//!
//! This library generates a React + TypeScript project skeleton from a
//! template: it copies the template tree, renders a few files, and writes a
//! `package.json` whose dependencies are the template's base set merged with
//! the optional packages the user picked.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Package classification and manifest merge,
//!   template fetching and copy planning, runtime detection
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait for product binaries
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{templates, Answers, Classifier};
//!
//! let mut fetcher = templates::TemplateFetcher::from_local("templates".into(), "my-cli");
//! let tree = fetcher.fetch_template("react-typescript").await?;
//! let classifier = Classifier::new(tree.manifest.packages.clone());
//! let plan = templates::plan_project(tree, &classifier, &answers)?;
//! templates::write_project(&plan, &target_dir).await?;
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod naming;
pub mod package;
pub mod product;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{Answers, PackageManager};
pub use error::ScaffoldError;
pub use naming::{normalize_name, title_case};
pub use package::{
    merge, Category, Classification, Classifier, DependencyEntry, DependencyMap,
    ManifestDocument, PackageChoice, PackageTable, Selection,
};
pub use product::ProductConfig;
pub use runtime::{check_runtimes, RuntimeInfo};
pub use templates::{
    plan_project, write_project, ProjectPlan, RootManifest, TemplateFetcher, TemplateManifest,
    TemplateSource, TemplateTree,
};

#[cfg(feature = "tui")]
pub use tui::run;
