//! package.json document and the dependency merge

use super::classify::Classification;
use super::map::DependencyMap;
use crate::error::ScaffoldError;
use crate::naming::normalize_name;
use serde::{Deserialize, Serialize};

/// The generated project's package.json
///
/// `name` and the two dependency objects are typed; every other top-level
/// field of the base template is carried through as-is, in template order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestDocument {
    #[serde(default)]
    pub name: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,

    #[serde(default)]
    pub dependencies: DependencyMap,

    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: DependencyMap,
}

impl ManifestDocument {
    /// Parse a base manifest. `file` is only used in the error message.
    pub fn from_json(content: &str, file: &str) -> Result<Self, ScaffoldError> {
        serde_json::from_str(content).map_err(|e| ScaffoldError::InvalidManifest {
            file: file.to_string(),
            reason: e.to_string(),
        })
    }

    /// Two-space indented JSON with a trailing newline
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}

/// Build the project manifest from a base template.
///
/// The name is normalized from `app_name`, each dependency category is the
/// union of base and additions (additions win) sorted by name. `base` is
/// never modified, so one parsed template can serve any number of runs.
pub fn merge(
    base: &ManifestDocument,
    app_name: &str,
    runtime_adds: &DependencyMap,
    dev_adds: &DependencyMap,
) -> ManifestDocument {
    let result = ManifestDocument {
        name: normalize_name(app_name),
        extra: base.extra.clone(),
        dependencies: base.dependencies.overlay(runtime_adds).into_sorted(),
        dev_dependencies: base.dev_dependencies.overlay(dev_adds).into_sorted(),
    };

    tracing::debug!(
        name = %result.name,
        dependencies = result.dependencies.len(),
        dev_dependencies = result.dev_dependencies.len(),
        "merged package manifest"
    );

    result
}

/// `merge` with the output of the classifier
pub fn merge_classified(
    base: &ManifestDocument,
    app_name: &str,
    additions: &Classification,
) -> ManifestDocument {
    merge(base, app_name, &additions.runtime, &additions.development)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = r#"{
  "name": "template",
  "version": "1.0.0",
  "scripts": { "start": "node server.js" },
  "dependencies": { "react-dom": "^16.0.0", "react": "^16.0.0" },
  "devDependencies": { "webpack": "^4.0.0", "typescript": "^3.0.0" },
  "license": "MIT"
}"#;

    fn base() -> ManifestDocument {
        ManifestDocument::from_json(BASE, "_package.json").unwrap()
    }

    fn deps(pairs: &[(&str, &str)]) -> DependencyMap {
        pairs.iter().copied().collect()
    }

    fn is_strictly_ascending(map: &DependencyMap) -> bool {
        let keys: Vec<&str> = map.keys().collect();
        keys.windows(2).all(|w| w[0].as_bytes() < w[1].as_bytes())
    }

    #[test]
    fn test_union_with_override() {
        let mut base = base();
        base.dependencies = deps(&[("a", "1.0"), ("b", "2.0")]);

        let merged = merge(&base, "app", &deps(&[("b", "3.0"), ("c", "4.0")]), &deps(&[]));

        assert_eq!(
            merged.dependencies.iter().collect::<Vec<_>>(),
            vec![("a", "1.0"), ("b", "3.0"), ("c", "4.0")]
        );
    }

    #[test]
    fn test_merge_is_deterministic() {
        let base = base();
        let runtime = deps(&[("mobx", "^3.3.1"), ("glamor", "^2.20.40")]);
        let dev = deps(&[("mobx-react-devtools", "^4.2.15")]);

        let first = merge(&base, "My Cool App", &runtime, &dev)
            .to_json_pretty()
            .unwrap();
        let second = merge(&base, "My Cool App", &runtime, &dev)
            .to_json_pretty()
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_merge_sorts_both_categories() {
        let merged = merge(
            &base(),
            "app",
            &deps(&[("zod", "1"), ("axios", "1")]),
            &deps(&[("ts-loader", "1"), ("@types/node", "1")]),
        );

        assert!(is_strictly_ascending(&merged.dependencies));
        assert!(is_strictly_ascending(&merged.dev_dependencies));
        assert_eq!(
            merged.dev_dependencies.keys().collect::<Vec<_>>(),
            vec!["@types/node", "ts-loader", "typescript", "webpack"]
        );
    }

    #[test]
    fn test_merge_does_not_mutate_base() {
        let base = base();
        let snapshot = base.clone();

        let _ = merge(
            &base,
            "Other",
            &deps(&[("react", "^17.0.0"), ("mobx", "^3.3.1")]),
            &deps(&[("tslint", "^5.0.0")]),
        );

        assert_eq!(base, snapshot);
        assert_eq!(base.dependencies.get("react"), Some("^16.0.0"));
        assert_eq!(
            base.dependencies.keys().collect::<Vec<_>>(),
            vec!["react-dom", "react"]
        );
    }

    #[test]
    fn test_empty_additions_still_sorted() {
        let base = base();
        let merged = merge(&base, "app", &DependencyMap::new(), &DependencyMap::new());

        assert_eq!(
            merged.dependencies.iter().collect::<Vec<_>>(),
            vec![("react", "^16.0.0"), ("react-dom", "^16.0.0")]
        );
        assert_eq!(
            merged.dev_dependencies.iter().collect::<Vec<_>>(),
            vec![("typescript", "^3.0.0"), ("webpack", "^4.0.0")]
        );
    }

    #[test]
    fn test_empty_dev_dependencies_receive_additions() {
        let base = ManifestDocument::from_json(r#"{"name":"x","devDependencies":{}}"#, "p").unwrap();
        let merged = merge(
            &base,
            "x",
            &DependencyMap::new(),
            &deps(&[("lintPluginX", "^1.2.0")]),
        );

        assert_eq!(
            merged.dev_dependencies.iter().collect::<Vec<_>>(),
            vec![("lintPluginX", "^1.2.0")]
        );
    }

    #[test]
    fn test_name_is_normalized() {
        let merged = merge(&base(), "My Cool App", &DependencyMap::new(), &DependencyMap::new());
        assert_eq!(merged.name, "my-cool-app");

        let blank = merge(&base(), "  ", &DependencyMap::new(), &DependencyMap::new());
        assert_eq!(blank.name, "");
    }

    #[test]
    fn test_serialized_layout() {
        let merged = merge(
            &base(),
            "My App",
            &deps(&[("glamor", "^2.20.40")]),
            &DependencyMap::new(),
        );
        let json = merged.to_json_pretty().unwrap();

        let expected = r#"{
  "name": "my-app",
  "version": "1.0.0",
  "scripts": {
    "start": "node server.js"
  },
  "license": "MIT",
  "dependencies": {
    "glamor": "^2.20.40",
    "react": "^16.0.0",
    "react-dom": "^16.0.0"
  },
  "devDependencies": {
    "typescript": "^3.0.0",
    "webpack": "^4.0.0"
  }
}
"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_missing_dependency_objects_default_to_empty() {
        let base = ManifestDocument::from_json(r#"{"name":"bare"}"#, "p").unwrap();
        let merged = merge(&base, "bare", &deps(&[("react", "1")]), &DependencyMap::new());

        assert_eq!(merged.dependencies.len(), 1);
        assert!(merged.dev_dependencies.is_empty());
    }

    #[test]
    fn test_invalid_base_manifest() {
        let err = ManifestDocument::from_json("{ not json", "_package.json").unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidManifest { ref file, .. } if file == "_package.json"));
    }
}
