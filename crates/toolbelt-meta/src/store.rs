//! Format-agnostic manifest reading

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{Error, Result};

/// File extensions [`ManifestStore`] understands.
pub const MANIFEST_EXTENSIONS: &[&str] = &["toml", "json", "yaml", "yml"];

/// True if `path` carries a manifest extension.
pub fn is_manifest_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MANIFEST_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Reads manifest files, picking the format from the file extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestStore;

impl ManifestStore {
    pub fn new() -> Self {
        Self
    }

    /// Load a file:
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();
        if !MANIFEST_EXTENSIONS.contains(&extension.as_str()) {
            return Err(Error::UnsupportedFormat { extension });
        }

        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let parse_error = |format: &str, message: String| Error::ManifestParse {
            path: path.to_path_buf(),
            format: format.into(),
            message,
        };

        match extension.as_str() {
            "toml" => toml::from_str(&content).map_err(|e| parse_error("TOML", e.to_string())),
            "json" => {
                serde_json::from_str(&content).map_err(|e| parse_error("JSON", e.to_string()))
            }
            _ => serde_yaml::from_str(&content).map_err(|e| parse_error("YAML", e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Manifest;
    use rstest::rstest;
    use toolbelt_test_utils::FixtureTree;

    #[rstest]
    #[case("demo.toml", "[[task]]\nname = \"t\"\nargs = [\"a\"]\n")]
    #[case("demo.json", r#"{ "task": [ { "name": "t", "args": ["a"] } ] }"#)]
    #[case("demo.yaml", "task:\n  - name: t\n    args: [a]\n")]
    #[case("demo.YML", "task:\n  - name: t\n    args: [a]\n")]
    fn test_load_each_format(#[case] file: &str, #[case] content: &str) {
        let tree = FixtureTree::new().file(file, content);
        let manifest: Manifest = ManifestStore::new().load(&tree.path(file)).unwrap();
        assert_eq!(manifest.tasks[0].name, "t");
        assert_eq!(manifest.tasks[0].args, vec!["a"]);
    }

    #[test]
    fn test_unsupported_extension() {
        let tree = FixtureTree::new().file("demo.ini", "x=1");
        let err = ManifestStore::new()
            .load::<Manifest>(&tree.path("demo.ini"))
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { ref extension } if extension == "ini"));
    }

    #[test]
    fn test_parse_error_names_file_and_format() {
        let tree = FixtureTree::new().file("bad.toml", "[[task]\nname=");
        let err = ManifestStore::new()
            .load::<Manifest>(&tree.path("bad.toml"))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("TOML"), "{message}");
        assert!(message.contains("bad.toml"), "{message}");
    }

    #[test]
    fn test_is_manifest_file() {
        assert!(is_manifest_file(Path::new("a/b.toml")));
        assert!(is_manifest_file(Path::new("b.Yaml")));
        assert!(!is_manifest_file(Path::new("b.txt")));
        assert!(!is_manifest_file(Path::new("toml")));
    }
}
