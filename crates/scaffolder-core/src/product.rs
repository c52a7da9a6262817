//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface that each scaffolding binary implements
//! to configure where templates come from and what it tells the user.

use std::path::{Path, PathBuf};

/// Configuration trait for different CLI products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - Template source defaults
/// - Documentation links
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Directory holding the bundled templates (root template.yaml lives here)
    fn default_template_dir(&self) -> PathBuf;

    /// Environment variable name for fetching templates from a URL instead
    fn template_url_env(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Command that starts the generated app
    fn start_command(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, install_command: &str, installed: bool) -> Vec<String>;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
