//! Common utilities for integration tests

pub mod cli;

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

/// Scratch directory holding a config tuned for fast, deterministic runs
pub struct TestConfig {
    _dir: TempDir,
    pub path: PathBuf,
}

impl TestConfig {
    /// Short debounce, zero latency, no failures
    pub fn fast() -> Result<Self> {
        Self::with_contents(
            r#"
[form]
debounce_ms = 10

[mock]
taken_names = ["eve"]
locations = ["Canada", "NYC"]
min_latency_ms = 0
max_latency_ms = 0
failure_rate = 0.0
"#,
        )
    }

    pub fn with_contents(contents: &str) -> Result<Self> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents)?;
        Ok(Self { _dir: dir, path })
    }

    /// Config path inside a fresh directory, with no file written yet
    pub fn absent() -> Result<Self> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("config.toml");
        Ok(Self { _dir: dir, path })
    }
}
