//! [`FixtureTree`] temporary directories for manifest and file tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory populated through chained helpers.
///
/// # Example
///
/// ```rust
/// use toolbelt_test_utils::FixtureTree;
///
/// let tree = FixtureTree::new()
///     .file("src/Main.java", "class Main {}")
///     .manifest("demo.toml", "[[task]]\nname = \"t\"\nargs = [\"echo\"]\n");
/// tree.assert_file_exists("src/Main.java");
/// tree.assert_file_exists("manifests/demo.toml");
/// ```
pub struct FixtureTree {
    temp_dir: TempDir,
}

impl Default for FixtureTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureTree {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Directory manifests are written to by [`FixtureTree::manifest`].
    pub fn manifests(&self) -> PathBuf {
        self.path("manifests")
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn file(self, relative: &str, content: &str) -> Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        self
    }

    pub fn dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.path(relative)).unwrap();
        self
    }

    /// Write a manifest file into the `manifests/` directory.
    pub fn manifest(self, file_name: &str, content: &str) -> Self {
        self.file(&format!("manifests/{file_name}"), content)
    }

    /// Create an executable shell script at `relative`.
    #[cfg(unix)]
    pub fn script(self, relative: &str, body: &str) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let tree = self.file(relative, &format!("#!/bin/sh\n{body}\n"));
        let path = tree.path(relative);
        let mut permissions = fs::metadata(&path).unwrap().permissions();
        permissions.set_mode(0o755);
        fs::set_permissions(&path, permissions).unwrap();
        tree
    }

    pub fn assert_file_exists(&self, relative: &str) {
        let path = self.path(relative);
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap()
    }
}
