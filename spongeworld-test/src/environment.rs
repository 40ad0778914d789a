//! Test environment management
//!
//! Provides isolated test directories with automatic cleanup using RAII.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with automatic cleanup
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("spongeworld-test")
            .context("Failed to create temporary directory")?;
        Ok(Self { temp_dir })
    }

    /// Get the root path of the test environment
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of a file inside the environment (not created)
    pub fn path(&self, name: impl AsRef<Path>) -> PathBuf {
        self.root().join(name)
    }

    /// Write a file in the test environment, creating parent directories
    pub fn write_file(&self, name: impl AsRef<Path>, content: &[u8]) -> Result<PathBuf> {
        let full_path = self.path(name);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full_path, content)
            .with_context(|| format!("Failed to write {}", full_path.display()))?;
        Ok(full_path)
    }

    /// Write a gzip-compressed file in the test environment
    pub fn write_gzip(&self, name: impl AsRef<Path>, content: &[u8]) -> Result<PathBuf> {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let full_path = self.path(name);
        let file = std::fs::File::create(&full_path)?;
        let mut gz = GzEncoder::new(file, Compression::default());
        gz.write_all(content)?;
        gz.finish()?;
        Ok(full_path)
    }
}
