//! Loading manifests from a file or a directory of files
//!
//! A directory is read non-recursively:
//!
//! ```text
//! manifests/
//!   10-java.toml
//!   20-rust.yaml
//!   notes.txt      (ignored)
//! ```
//!
//! Files load in file name order, which is also the order their units
//! take part in resolution.

use std::fs;
use std::path::{Path, PathBuf};

use crate::store::{ManifestStore, is_manifest_file};
use crate::{Error, Manifest, Result};

/// A manifest together with the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedManifest {
    pub path: PathBuf,
    pub manifest: Manifest,
}

impl LoadedManifest {
    /// Declared unit name, or the file stem.
    pub fn unit_name(&self) -> String {
        self.manifest.unit.name.clone().unwrap_or_else(|| {
            self.path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
    }

    /// Directory relative program paths resolve against.
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Loads manifests for discovery
#[derive(Debug, Default)]
pub struct ManifestLoader {
    store: ManifestStore,
}

impl ManifestLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`: a single manifest file, or every manifest in a directory.
    ///
    /// A single file must load. In a directory, files that fail to load are
    /// logged and skipped.
    pub fn load(&self, path: &Path) -> Result<Vec<LoadedManifest>> {
        let metadata = fs::metadata(path).map_err(|e| Error::io(path, e))?;
        if metadata.is_dir() {
            return self.load_dir(path);
        }
        let manifest = self.store.load(path)?;
        Ok(vec![LoadedManifest {
            path: path.to_path_buf(),
            manifest,
        }])
    }

    fn load_dir(&self, dir: &Path) -> Result<Vec<LoadedManifest>> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|e| Error::io(dir, e))?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_manifest_file(path))
            .collect();
        paths.sort();

        let mut loaded = Vec::new();
        for path in paths {
            match self.store.load::<Manifest>(&path) {
                Ok(manifest) => loaded.push(LoadedManifest { path, manifest }),
                Err(e) => {
                    tracing::warn!("Failed to load {:?}: {}", path, e);
                }
            }
        }
        tracing::debug!(dir = %dir.display(), manifests = loaded.len(), "loaded manifest directory");
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use toolbelt_test_utils::FixtureTree;

    #[test]
    fn test_load_directory_sorted_and_skips_bad_files() {
        let tree = FixtureTree::new()
            .manifest("20-second.yaml", "unit:\n  name: second\n")
            .manifest("10-first.toml", "")
            .manifest("15-broken.json", "{ not json")
            .manifest("notes.txt", "ignored");

        let loaded = ManifestLoader::new().load(&tree.manifests()).unwrap();
        let names: Vec<String> = loaded.iter().map(LoadedManifest::unit_name).collect();
        assert_eq!(names, vec!["10-first", "second"]);
    }

    #[test]
    fn test_single_file_errors_propagate() {
        let tree = FixtureTree::new().manifest("broken.toml", "[[task]");
        let err = ManifestLoader::new()
            .load(&tree.path("manifests/broken.toml"))
            .unwrap_err();
        assert!(matches!(err, Error::ManifestParse { .. }));
    }

    #[test]
    fn test_missing_path() {
        let tree = FixtureTree::new();
        let err = ManifestLoader::new().load(&tree.path("absent")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_base_dir() {
        let tree = FixtureTree::new().manifest("demo.toml", "");
        let loaded = ManifestLoader::new()
            .load(&tree.path("manifests/demo.toml"))
            .unwrap();
        assert_eq!(loaded[0].base_dir(), tree.manifests().as_path());
        assert_eq!(loaded[0].unit_name(), "demo");
    }
}
