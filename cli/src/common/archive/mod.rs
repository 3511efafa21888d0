//! # ueci Archive Utilities (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! Creating and unpacking archives in the formats the CI pipeline exchanges:
//! zip for packaged distributions, plain and gzipped tar for everything else.
//!
//! ## Architecture
//!
//! - **`ArchiveFormat`**: `zip`, `tar` or `gztar`. Parsed from CLI/config strings
//!   and detected from file extensions.
//! - **`compress`**: archives a directory into `<base_name>.<ext>` and returns the
//!   resulting path, so callers pass a name without an extension.
//! - **`extract`**: unpacks a local archive or a remote one (`https://...`), which
//!   is downloaded to a temporary directory first. The destination can be cleared
//!   beforehand so stale files never survive a re-extract.
//! - **`tar`** / **`zip`**: the format-specific readers and writers.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{self, ArchiveFormat};
//! # async fn run_example() -> crate::core::error::Result<()> {
//! let zip = archive::compress(
//!     std::path::Path::new("Game-1.0.0-Linux"),
//!     ArchiveFormat::Zip,
//!     std::path::Path::new("dist"),
//! )?;
//! archive::extract(&zip.to_string_lossy(), std::path::Path::new("unpacked"), true).await?;
//! # Ok(())
//! # }
//! ```
//!
pub mod tar;
pub mod zip;

use crate::common::fs::io::{ensure_dir_exists, is_uri, remove_path};
use crate::common::network;
use crate::core::error::{Result, UeciError};
use anyhow::{anyhow, Context};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// Supported archive container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// `.zip`, deflate-compressed.
    Zip,
    /// `.tar`, uncompressed.
    Tar,
    /// `.tar.gz`
    GzTar,
}

impl ArchiveFormat {
    /// File extension (without the leading dot) appended by `compress`.
    pub fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::Tar => "tar",
            ArchiveFormat::GzTar => "tar.gz",
        }
    }

    /// Detects the format from a file name or URI, ignoring case and any query string.
    pub fn detect(name: &str) -> Option<Self> {
        let name = name.split(['?', '#']).next().unwrap_or(name).to_ascii_lowercase();
        if name.ends_with(".zip") {
            Some(ArchiveFormat::Zip)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(ArchiveFormat::GzTar)
        } else if name.ends_with(".tar") {
            Some(ArchiveFormat::Tar)
        } else {
            None
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::Tar => "tar",
            ArchiveFormat::GzTar => "gztar",
        };
        f.write_str(name)
    }
}

impl FromStr for ArchiveFormat {
    type Err = UeciError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zip" => Ok(ArchiveFormat::Zip),
            "tar" => Ok(ArchiveFormat::Tar),
            "gztar" | "tar.gz" | "tgz" => Ok(ArchiveFormat::GzTar),
            other => Err(UeciError::Archive(format!(
                "Unsupported archive format '{}' (expected zip, tar or gztar)",
                other
            ))),
        }
    }
}

/// Appends the format's extension to `base_name` without disturbing dots already in it.
fn archive_path(base_name: &Path, format: ArchiveFormat) -> PathBuf {
    let mut os = base_name.as_os_str().to_os_string();
    os.push(".");
    os.push(format.extension());
    PathBuf::from(os)
}

/// Compresses the contents of `root_dir` into an archive named `base_name` plus the
/// format's extension.
///
/// # Arguments
///
/// * `base_name` - Output path without extension, e.g. `/work/Game-1.2.3-Linux`.
/// * `format` - The container format to produce.
/// * `root_dir` - Directory whose children become the archive's top-level entries.
///
/// # Returns
///
/// The path of the created archive.
///
/// # Errors
///
/// * `UeciError::Archive` if `root_dir` is not a directory.
/// * Any I/O error while reading inputs or writing the archive.
#[instrument(fields(base_name = %base_name.display(), root_dir = %root_dir.display()))]
pub fn compress(base_name: &Path, format: ArchiveFormat, root_dir: &Path) -> Result<PathBuf> {
    if !root_dir.is_dir() {
        return Err(anyhow!(UeciError::Archive(format!(
            "Cannot compress {:?}: not a directory",
            root_dir
        ))));
    }
    let output = archive_path(base_name, format);
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }

    match format {
        ArchiveFormat::Zip => self::zip::write_zip(root_dir, &output)?,
        ArchiveFormat::Tar => self::tar::write_tar(root_dir, &output, false)?,
        ArchiveFormat::GzTar => self::tar::write_tar(root_dir, &output, true)?,
    }
    info!("Created {} archive {:?}", format, output);
    Ok(output)
}

/// Extracts a local archive file into `dest`, choosing the reader by extension.
pub fn extract_local(archive: &Path, dest: &Path) -> Result<()> {
    let format = ArchiveFormat::detect(&archive.to_string_lossy()).ok_or_else(|| {
        anyhow!(UeciError::Archive(format!(
            "Cannot determine archive format of {:?}",
            archive
        )))
    })?;
    ensure_dir_exists(dest)?;
    match format {
        ArchiveFormat::Zip => self::zip::extract_zip(archive, dest),
        ArchiveFormat::Tar => self::tar::extract_tar(archive, dest, false),
        ArchiveFormat::GzTar => self::tar::extract_tar(archive, dest, true),
    }
}

/// Extracts the archive at `archive` (a local path or a URI) into `dest`.
///
/// Remote archives are downloaded into a temporary directory, which is removed
/// once extraction finishes. When `remove_existing` is set, `dest` is deleted first.
///
/// # Errors
///
/// * Download failures (see `network::download_to_file`).
/// * `UeciError::Archive` for unknown formats or corrupt archives.
#[instrument(fields(dest = %dest.display()))]
pub async fn extract(archive: &str, dest: &Path, remove_existing: bool) -> Result<()> {
    if remove_existing {
        debug!("Removing existing extraction destination {:?}", dest);
        remove_path(dest)?;
    }

    if is_uri(archive) {
        let temp = tempfile::tempdir().context("Failed to create temporary download directory")?;
        let file_name = archive
            .split(['?', '#'])
            .next()
            .and_then(|p| p.rsplit('/').next())
            .filter(|n| !n.is_empty())
            .unwrap_or("download");
        let local = temp.path().join(file_name);
        network::download_to_file(archive, &local).await?;
        extract_local(&local, dest)
    } else {
        extract_local(Path::new(archive), dest)
    }
}
