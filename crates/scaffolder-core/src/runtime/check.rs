//! Runtime detection for Node.js and package managers

use crate::config::PackageManager;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    /// `Name (version)` or `Name (not installed)`
    pub fn describe(&self) -> String {
        if self.available {
            format!("{} ({})", self.name, self.version.as_deref().unwrap_or("unknown"))
        } else {
            format!("{} (not installed)", self.name)
        }
    }
}

fn probe(binary: &str, name: &'static str) -> RuntimeInfo {
    match Command::new(binary).arg("--version").output() {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("node", "Node.js")
}

/// Check if a package manager is available
pub fn check_package_manager(manager: &PackageManager) -> RuntimeInfo {
    probe(manager.name, manager.display_name)
}

/// Report Node.js and the package manager. Nothing here is fatal: the project
/// can be generated without them, only installing and running need them.
pub fn check_runtimes(manager: &PackageManager) -> Vec<RuntimeInfo> {
    vec![check_node(), check_package_manager(manager)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_available() {
        let info = RuntimeInfo {
            name: "Node.js",
            version: Some("v18.0.0".to_string()),
            available: true,
        };
        assert_eq!(info.describe(), "Node.js (v18.0.0)");
    }

    #[test]
    fn test_describe_missing() {
        let info = RuntimeInfo {
            name: "Yarn",
            version: None,
            available: false,
        };
        assert_eq!(info.describe(), "Yarn (not installed)");
    }

    #[test]
    fn test_probe_missing_binary() {
        let info = probe("definitely-not-a-real-runtime", "Nope");
        assert!(!info.available);
        assert!(info.version.is_none());
    }

    #[test]
    fn test_check_runtimes_reports_both() {
        let manager = crate::config::PACKAGE_MANAGERS[0];
        let runtimes = check_runtimes(&manager);
        assert_eq!(runtimes.len(), 2);
        assert_eq!(runtimes[0].name, "Node.js");
        assert_eq!(runtimes[1].name, "Yarn");
    }
}
