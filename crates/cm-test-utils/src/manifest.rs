//! [`TestManifest`] for manifest loading scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory holding a `content-types.toml` manifest.
///
/// # Example
///
/// ```rust,no_run
/// use cm_test_utils::TestManifest;
///
/// let manifest = TestManifest::new("[[content_type]]\nname = \"Author\"\ndisplay_field = \"name\"\n");
/// assert!(manifest.path().exists());
/// ```
pub struct TestManifest {
    temp_dir: TempDir,
    path: PathBuf,
}

impl TestManifest {
    pub const FILE_NAME: &'static str = "content-types.toml";

    /// Write `content` as the manifest.
    pub fn new(content: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(Self::FILE_NAME);
        fs::write(&path, content).unwrap();
        Self { temp_dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Replace the manifest content.
    pub fn rewrite(&self, content: &str) {
        fs::write(&self.path, content).unwrap();
    }
}
