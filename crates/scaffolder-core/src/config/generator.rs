//! Answers for a generation run and package manager selection

use crate::package::Selection;
use std::path::Path;

/// Values collected from the prompts or command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    /// Free-text app name
    pub app_name: String,

    /// Package tags the user picked
    pub selection: Selection,

    /// Leave dependency installation to the user
    pub skip_install: bool,
}

impl Answers {
    /// Default app name for a project directory: its final component
    pub fn default_app_name(dir: &Path) -> String {
        dir.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A package manager able to install the generated manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageManager {
    /// Binary name
    pub name: &'static str,
    /// Human-readable name
    pub display_name: &'static str,
    /// Arguments for installing the manifest's dependencies
    pub install_args: &'static [&'static str],
    /// Installation instructions
    pub docs_url: &'static str,
}

impl PackageManager {
    /// Full install command as shown to the user
    pub fn install_command(&self) -> String {
        std::iter::once(self.name)
            .chain(self.install_args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Supported package managers in order of preference
pub const PACKAGE_MANAGERS: &[PackageManager] = &[
    PackageManager {
        name: "yarn",
        display_name: "Yarn",
        install_args: &[],
        docs_url: "https://classic.yarnpkg.com/en/docs/install",
    },
    PackageManager {
        name: "npm",
        display_name: "npm",
        install_args: &["install"],
        docs_url: "https://docs.npmjs.com/downloading-and-installing-node-js-and-npm",
    },
];

/// Detect the preferred available package manager
pub fn detect_package_manager() -> &'static PackageManager {
    for manager in PACKAGE_MANAGERS {
        if std::process::Command::new(manager.name)
            .arg("--version")
            .output()
            .is_ok_and(|o| o.status.success())
        {
            return manager;
        }
    }
    // Default to yarn if nothing detected (install step reports it as missing)
    &PACKAGE_MANAGERS[0]
}

/// Final message of a run
pub fn completion_message(
    app_name: &str,
    install_command: &str,
    start_command: &str,
    install_skipped: bool,
) -> String {
    if install_skipped {
        format!(
            "Please install dependencies by executing '{}' before getting started.",
            install_command
        )
    } else {
        format!(
            "Congratulations! Your '{}' app is successfully set up. Please run '{}' to get started.",
            app_name, start_command
        )
    }
}
