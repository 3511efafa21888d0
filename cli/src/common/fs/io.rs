//! # ueci Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Small wrappers around `std::fs` that add context to errors:
//! - **`ensure_dir_exists`**: `mkdir -p`, failing if the path is a file.
//! - **`read_file_to_string`** / **`write_string_to_file`**: whole-file I/O.
//! - **`remove_path`**: removes a file or a directory tree; absent paths are a no-op.
//! - **`is_uri`**: tells remote resources (`scheme://...`) apart from local paths.
//!
use crate::core::error::{Result, UeciError};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path, creating parents as needed.
///
/// # Errors
///
/// Returns an `Err` if the path exists but is not a directory, or if creation fails.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(UeciError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes string content to a file, creating the parent directory if necessary.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    debug!("Wrote content to file: {:?}", path);
    Ok(())
}

/// Removes the specified file or directory if it exists.
///
/// Symlinks are removed themselves, never followed.
pub fn remove_path(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Nothing to remove at {:?}", path);
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to inspect {:?}", path));
        }
    };
    if metadata.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory {:?}", path))?;
    } else {
        fs::remove_file(path).with_context(|| format!("Failed to remove file {:?}", path))?;
    }
    info!("Removed {:?}", path);
    Ok(())
}

/// Determines if the specified path is a URI rather than a local filesystem path.
pub fn is_uri(path: &str) -> bool {
    path.contains("://")
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_read_write_string_to_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("nested/test_rw.txt");
        write_string_to_file(&file_path, "Hello, ueci!")?;
        assert_eq!(read_file_to_string(&file_path)?, "Hello, ueci!");
        Ok(())
    }

    #[test]
    fn test_remove_path_file_dir_and_missing() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("file.txt");
        let dir_path = base_dir.path().join("dir/inner");
        fs::write(&file_path, "x")?;
        fs::create_dir_all(&dir_path)?;
        fs::write(dir_path.join("deep.txt"), "y")?;

        remove_path(&file_path)?;
        remove_path(&base_dir.path().join("dir"))?;
        remove_path(&base_dir.path().join("never-existed"))?;

        assert!(!file_path.exists());
        assert!(!base_dir.path().join("dir").exists());
        Ok(())
    }

    #[test]
    fn test_is_uri() {
        assert!(is_uri("https://example.com/archive.zip"));
        assert!(is_uri("gs://bucket/key"));
        assert!(!is_uri("/var/cache/archive.zip"));
        assert!(!is_uri("C:\\cache\\archive.zip"));
    }
}
