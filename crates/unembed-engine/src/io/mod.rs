use crate::models::VaultIndex;
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid vault directory: {0}")]
    InvalidVaultDir(String),
    #[error("Path is not inside the vault: {0}")]
    OutsideVault(PathBuf),
}

/// Read a vault file and return its content
pub fn read_file(relative_path: &RelativePath, vault_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(vault_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write content to a vault file
pub fn write_file(
    relative_path: &RelativePath,
    vault_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(vault_root);

    // Create parent directories if they don't exist
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Vault-relative form of `path`, which may be absolute or relative to the
/// current directory.
pub fn relative_to_vault(path: &Path, vault_root: &Path) -> Result<RelativePathBuf, IoError> {
    let stripped = path
        .strip_prefix(vault_root)
        .map_err(|_| IoError::OutsideVault(path.to_path_buf()))?;
    RelativePathBuf::from_path(stripped).map_err(|_| IoError::OutsideVault(path.to_path_buf()))
}

/// Scan for markdown files in the vault
pub fn scan_markdown_files(vault_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    let files = scan_vault_files(vault_root)?;
    Ok(files
        .into_iter()
        .filter(|path| is_markdown(path))
        .collect())
}

/// Scan for every file in the vault, skipping hidden entries such as `.obsidian`
pub fn scan_vault_files(vault_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    validate_vault_dir(vault_root)?;

    let mut files = Vec::new();
    scan_directory_recursive(vault_root, &mut files)?;
    files.sort();
    Ok(files)
}

/// Build a link index over every file in the vault
pub fn build_vault_index(vault_root: &Path) -> Result<VaultIndex, IoError> {
    let files = scan_vault_files(vault_root)?;
    let mut index = VaultIndex::new();
    for file in &files {
        index.add_file(relative_to_vault(file, vault_root)?);
    }
    log::debug!(
        "indexed {} files under {}",
        index.len(),
        vault_root.display()
    );
    Ok(index)
}

pub fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_vault_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidVaultDir(format!(
            "vault directory not found: {}",
            path.display()
        )));
    }

    Ok(())
}
