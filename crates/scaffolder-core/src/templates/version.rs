//! CLI / template version compatibility

use anyhow::Result;
use semver::Version;
use std::fmt;

/// The template expects a newer generator than the one running
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionWarning {
    pub cli_version: Version,
    pub template_version: Version,
    pub upgrade_command: String,
}

impl fmt::Display for VersionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Template requires generator {} or newer (running {}). Update with: {}",
            self.template_version, self.cli_version, self.upgrade_command
        )
    }
}

/// Warn when the CLI is older than the template. Unparsable versions never warn.
pub fn check_compatibility(
    cli_version: &str,
    template_version: &str,
    upgrade_command: &str,
) -> Option<VersionWarning> {
    let cli_version = parse_version(cli_version).ok()?;
    let template_version = parse_version(template_version).ok()?;

    (cli_version < template_version).then(|| VersionWarning {
        cli_version,
        template_version,
        upgrade_command: upgrade_command.to_string(),
    })
}

/// Parse a semver string, accepting a leading `v`
pub fn parse_version(version_str: &str) -> Result<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPGRADE: &str = "cargo install react-ts-tools --force";

    #[test]
    fn test_cli_older_than_template() {
        let warning = check_compatibility("0.1.0", "0.2.0", UPGRADE).unwrap();
        assert_eq!(warning.template_version, Version::new(0, 2, 0));
        assert!(warning.to_string().contains(UPGRADE));
    }

    #[test]
    fn test_cli_same_or_newer() {
        assert!(check_compatibility("0.1.0", "0.1.0", UPGRADE).is_none());
        assert!(check_compatibility("1.0.0", "0.9.3", UPGRADE).is_none());
    }

    #[test]
    fn test_leading_v_is_accepted() {
        assert!(check_compatibility("v0.1.0", "v0.3.0", UPGRADE).is_some());
    }

    #[test]
    fn test_invalid_versions_do_not_warn() {
        assert!(check_compatibility("invalid", "0.1.0", UPGRADE).is_none());
        assert!(check_compatibility("0.1.0", "latest", UPGRADE).is_none());
    }
}
