//! Typed errors for configuration mistakes in templates and package tables
//!
//! I/O failures are reported through `anyhow` with path context; this enum only
//! covers the cases a caller may want to match on.

use thiserror::Error;

/// Errors raised while classifying packages or rendering a template
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScaffoldError {
    /// A selected tag has no entry in the package table
    #[error("Unknown package tag '{tag}'. Known tags: {known}")]
    UnknownTag { tag: String, known: String },

    /// A compact dependency entry could not be parsed
    #[error("Invalid dependency entry '{entry}': expected 'name:range' or 'name:range:dev'")]
    InvalidDependency { entry: String },

    /// A rendered file references a variable the template data does not provide
    #[error("Unknown template variable '{name}' in {file}")]
    UnknownVariable { file: String, name: String },

    /// A rendered file is not a valid template
    #[error("Failed to render {file}: {reason}")]
    TemplateSyntax { file: String, reason: String },

    /// A file referenced by template.yaml is missing from the template tree
    #[error("File '{path}' not found in template '{template}'")]
    MissingTemplateFile { template: String, path: String },

    /// A template path is absolute or climbs out of the project directory
    #[error("Path '{path}' escapes the project directory")]
    UnsafePath { path: String },

    /// The base package manifest could not be parsed
    #[error("Invalid package manifest {file}: {reason}")]
    InvalidManifest { file: String, reason: String },
}
