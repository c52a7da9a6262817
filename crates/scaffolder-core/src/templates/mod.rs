//! Template fetching, parsing, rendering and project generation
//!
//! This module provides:
//! - Template manifest types (RootManifest, TemplateManifest)
//! - Template fetching from remote URLs or local directories
//! - Placeholder rendering and the copy plan for a generated project
//! - Version compatibility checking

pub mod copier;
pub mod fetcher;
pub mod manifest;
pub mod render;
pub mod tree;
pub mod version;

use crate::product::ProductConfig;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

pub use copier::{plan_project, write_project, ProjectPlan};
pub use fetcher::{TemplateFetcher, TemplateSource};
pub use manifest::{FileMapping, RootManifest, TemplateManifest, Variant};
pub use render::TemplateData;
pub use tree::TemplateTree;
pub use version::check_compatibility;

/// Pack one template directory into `<dir>/<template>.zip`, returning its size
pub fn build_zip(dir: &Path, template_name: &str) -> Result<usize> {
    let zip_bytes = TemplateFetcher::build_local_zip(dir, template_name)?;

    // Read the archive back so a broken template.yaml fails here, not for users
    TemplateFetcher::extract_zip(&zip_bytes, template_name)?;

    let zip_path = dir.join(format!("{}.zip", template_name));
    std::fs::write(&zip_path, &zip_bytes)
        .with_context(|| format!("Failed to write {}", zip_path.display()))?;
    Ok(zip_bytes.len())
}

/// Build zip files for every template listed in the root template.yaml
pub async fn build_zips<C: ProductConfig>(
    config: &C,
    template_dir: &Option<PathBuf>,
) -> Result<()> {
    let dir = template_dir
        .clone()
        .unwrap_or_else(|| config.default_template_dir());

    let root_manifest = TemplateFetcher::from_local(dir.clone(), config.user_agent())
        .fetch_root_manifest()
        .await?;

    println!(
        "{}",
        format!("Packing {} templates from {}", config.display_name(), dir.display())
            .cyan()
            .bold()
    );

    let mut failed = Vec::new();
    for template_name in &root_manifest.templates {
        match build_zip(&dir, template_name) {
            Ok(size) => println!("  {} {} ({} bytes)", "ok".green(), template_name, size),
            Err(e) => {
                println!("  {} {}: {:#}", "failed".red(), template_name, e);
                failed.push(template_name.as_str());
            }
        }
    }

    if !failed.is_empty() {
        anyhow::bail!("Failed to pack templates: {}", failed.join(", "));
    }

    println!(
        "{} {} template zip(s)",
        "Built".green().bold(),
        root_manifest.templates.len()
    );
    Ok(())
}
