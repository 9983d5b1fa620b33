//! Shared fixtures for unit tests.

use std::path::PathBuf;
use tempfile::TempDir;

pub fn create_test_vault() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Writes `content` at `relative` inside the vault, creating folders as needed.
pub fn create_test_file(dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(relative);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
    }
    std::fs::write(&file_path, content).expect("Failed to write test file");
    file_path
}
