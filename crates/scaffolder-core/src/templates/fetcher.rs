//! Template fetching from a remote URL or a local directory
//!
//! Both sources go through zip archives:
//! - Remote: downloads `<base>/<template>.zip`
//! - Local: packs the template folder into an in-memory zip, then reads it back
//!
//! so a template behaves the same whether it is bundled or published.

use super::manifest::{is_contained, RootManifest, MANIFEST_FILE};
use super::tree::TemplateTree;
use crate::error::ScaffoldError;
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tokio::fs;
use url::Url;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Template source - either remote URL or local directory
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Remote(Url),
    Local(PathBuf),
}

impl TemplateSource {
    /// Remote source if the product's URL variable is set, bundled templates otherwise
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        match std::env::var(config.template_url_env()) {
            Ok(url_str) if !url_str.trim().is_empty() => {
                let url = Url::parse(url_str.trim())
                    .with_context(|| format!("Invalid template URL: {}", url_str))?;
                Ok(Self::Remote(url))
            }
            _ => Ok(Self::Local(config.default_template_dir())),
        }
    }

    /// Create a local template source from a path
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::Remote(url) => write!(f, "{}", url),
            TemplateSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Template fetcher - handles retrieving templates from remote or local sources
pub struct TemplateFetcher {
    source: TemplateSource,
    client: reqwest::Client,
    /// Downloaded/built and extracted templates
    template_cache: HashMap<String, TemplateTree>,
}

impl TemplateFetcher {
    /// Create a new fetcher with a custom user agent
    pub fn new(source: TemplateSource, user_agent: &str) -> Self {
        Self {
            source,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            template_cache: HashMap::new(),
        }
    }

    /// Create a fetcher from a product config
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let source = TemplateSource::from_config(config)?;
        Ok(Self::new(source, config.user_agent()))
    }

    /// Create a fetcher for local templates
    pub fn from_local(path: PathBuf, user_agent: &str) -> Self {
        Self::new(TemplateSource::local(path), user_agent)
    }

    /// Build a URL by appending a path segment, preserving query parameters
    fn build_url(base: &Url, path_segment: &str) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", base))?
            .pop_if_empty()
            .push(path_segment);
        Ok(url)
    }

    async fn get_bytes(&self, url: Url, what: &str) -> Result<Vec<u8>> {
        tracing::debug!(%url, "fetching {}", what);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch {} from {}", what, url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to fetch {} from {}: HTTP {}",
                what,
                url,
                response.status()
            );
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Fetch the root manifest listing available templates
    pub async fn fetch_root_manifest(&self) -> Result<RootManifest> {
        let content = match &self.source {
            TemplateSource::Remote(base_url) => {
                let url = Self::build_url(base_url, MANIFEST_FILE)?;
                let bytes = self.get_bytes(url, "root template manifest").await?;
                String::from_utf8_lossy(&bytes).into_owned()
            }
            TemplateSource::Local(path) => {
                let manifest_path = path.join(MANIFEST_FILE);
                fs::read_to_string(&manifest_path)
                    .await
                    .with_context(|| format!("Failed to read {}", manifest_path.display()))?
            }
        };
        serde_yaml::from_str(&content).context("Failed to parse root manifest")
    }

    /// Zip a local template directory in memory.
    ///
    /// Entries are stored as `<template_name>/<relative path>` in file name order.
    pub fn build_local_zip(template_dir: &Path, template_name: &str) -> Result<Vec<u8>> {
        let template_path = template_dir.join(template_name);
        if !template_path.join(MANIFEST_FILE).exists() {
            anyhow::bail!(
                "{} not found in {}",
                MANIFEST_FILE,
                template_path.display()
            );
        }

        let mut zip_buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut zip_buffer));
            let options =
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

            for entry in WalkDir::new(&template_path).sort_by_file_name() {
                let entry = entry.with_context(|| {
                    format!("Failed to walk template directory {}", template_path.display())
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }

                let relative = entry
                    .path()
                    .strip_prefix(&template_path)
                    .with_context(|| format!("Unexpected path {}", entry.path().display()))?;
                let relative = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");

                let content = std::fs::read(entry.path())
                    .with_context(|| format!("Failed to read {}", entry.path().display()))?;
                zip.start_file(format!("{}/{}", template_name, relative), options)?;
                zip.write_all(&content)?;
            }

            zip.finish()?;
        }

        Ok(zip_buffer)
    }

    /// Extract a template zip into a tree
    pub fn extract_zip(zip_bytes: &[u8], template_name: &str) -> Result<TemplateTree> {
        let mut archive = ZipArchive::new(Cursor::new(zip_bytes)).with_context(|| {
            format!(
                "Failed to read zip archive for template '{}'",
                template_name
            )
        })?;

        let mut files: BTreeMap<String, Vec<u8>> = BTreeMap::new();

        // Entries are stored as {template_name}/file
        let prefix = format!("{}/", template_name);

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }

            let full_path = file.name().to_string();
            if file.enclosed_name().is_none() {
                return Err(ScaffoldError::UnsafePath { path: full_path }.into());
            }
            let relative_path = full_path
                .strip_prefix(&prefix)
                .unwrap_or(&full_path)
                .to_string();
            if !is_contained(&relative_path) {
                return Err(ScaffoldError::UnsafePath {
                    path: relative_path,
                }
                .into());
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            files.insert(relative_path, contents);
        }

        TemplateTree::from_files(template_name, files)
    }

    /// Fetch/build, extract and cache a template
    pub async fn fetch_template(&mut self, template_name: &str) -> Result<&TemplateTree> {
        if !self.template_cache.contains_key(template_name) {
            let zip_bytes = match &self.source {
                TemplateSource::Remote(base_url) => {
                    let zip_url = Self::build_url(base_url, &format!("{}.zip", template_name))?;
                    self.get_bytes(zip_url, &format!("template '{}' zip", template_name))
                        .await?
                }
                TemplateSource::Local(path) => Self::build_local_zip(path, template_name)?,
            };

            let tree = Self::extract_zip(&zip_bytes, template_name)?;
            tracing::debug!(
                template = template_name,
                files = tree.len(),
                "loaded template"
            );
            self.template_cache.insert(template_name.to_string(), tree);
        }

        self.template_cache
            .get(template_name)
            .ok_or_else(|| anyhow::anyhow!("Template '{}' not found in cache", template_name))
    }

    /// Get the template source
    pub fn source(&self) -> &TemplateSource {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn sample_templates() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "template.yaml", "templates:\n  - basic\n");
        write(
            dir.path(),
            "basic/template.yaml",
            "name: Basic\ndescription: d\nversion: 0.1.0\n",
        );
        write(dir.path(), "basic/_package.json", r#"{"name":"x"}"#);
        write(dir.path(), "basic/src/_index.html", "<title>{{ appTitle }}</title>");
        write(dir.path(), "basic/tsconfig.json", "{}");
        dir
    }

    #[test]
    fn test_build_url_appends_segment() {
        let base = Url::parse("https://example.com/templates/?ref=main").unwrap();
        let url = TemplateFetcher::build_url(&base, "react.zip").unwrap();
        assert_eq!(url.as_str(), "https://example.com/templates/react.zip?ref=main");
    }

    #[test]
    fn test_local_zip_round_trip_keeps_tree() {
        let dir = sample_templates();

        let zip = TemplateFetcher::build_local_zip(dir.path(), "basic").unwrap();
        let tree = TemplateFetcher::extract_zip(&zip, "basic").unwrap();

        assert_eq!(
            tree.paths().collect::<Vec<_>>(),
            vec!["_package.json", "src/_index.html", "template.yaml", "tsconfig.json"]
        );
        assert_eq!(tree.manifest.name, "Basic");
        assert_eq!(tree.file_str("tsconfig.json").unwrap(), "{}");
    }

    #[test]
    fn test_local_zip_requires_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "empty/readme.md", "hi");
        assert!(TemplateFetcher::build_local_zip(dir.path(), "empty").is_err());
    }

    #[tokio::test]
    async fn test_fetch_from_local_source() {
        let dir = sample_templates();
        let mut fetcher = TemplateFetcher::from_local(dir.path().to_path_buf(), "test");

        let root = fetcher.fetch_root_manifest().await.unwrap();
        assert_eq!(root.templates, vec!["basic".to_string()]);

        let tree = fetcher.fetch_template("basic").await.unwrap();
        assert_eq!(tree.name, "basic");
        assert!(tree.file("_package.json").is_ok());
    }

    fn zip_with_entries(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extract_rejects_parent_dir_entry() {
        let zip = zip_with_entries(&[
            ("t/template.yaml", "name: T\ndescription: d\nversion: 0.1.0\n"),
            ("t/../escaped.txt", "outside"),
        ]);

        let err = TemplateFetcher::extract_zip(&zip, "t").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::UnsafePath { path }) if path == "../escaped.txt"
        ));
    }

    #[test]
    fn test_extract_rejects_absolute_entry() {
        let zip = zip_with_entries(&[
            ("t/template.yaml", "name: T\ndescription: d\nversion: 0.1.0\n"),
            ("/tmp/escaped.txt", "outside"),
        ]);

        let err = TemplateFetcher::extract_zip(&zip, "t").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::UnsafePath { .. })
        ));
    }
}
