//! # ueci Filesystem Copy Operations
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! `copy_path` copies either a single file or a whole directory tree to a
//! destination path, creating the destination's parent directories. Directory
//! copies go through `fs_extra` with `content_only` set, so `dest` always
//! becomes the copy of `source` rather than a directory containing it. An
//! existing `dest` directory is merged into, overwriting files of the same name.
//!
//! Used by the packager to stage extra files into the distribution and by the
//! Conan helper to copy package contents.
//!
use crate::core::error::{Result, UeciError};
use anyhow::{anyhow, Context};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::io::ensure_dir_exists;

/// Copies the specified file or directory to the specified destination location.
///
/// # Errors
///
/// * `UeciError::FileSystem` if `source` does not exist.
/// * Any I/O error raised while creating directories or copying data.
pub fn copy_path(source: &Path, dest: &Path) -> Result<()> {
    if !source.exists() {
        return Err(anyhow!(UeciError::FileSystem(format!(
            "Cannot copy {:?}: source does not exist",
            source
        ))));
    }
    if let Some(parent) = dest.parent() {
        ensure_dir_exists(parent)?;
    }

    if source.is_dir() {
        debug!("Copying directory {:?} to {:?}", source, dest);
        let mut options = fs_extra::dir::CopyOptions::new();
        options.overwrite = true;
        options.copy_inside = true;
        options.content_only = true;
        fs_extra::dir::copy(source, dest, &options).map_err(|e| {
            anyhow!(e).context(format!("Failed to copy dir {:?} to {:?}", source, dest))
        })?;
    } else {
        debug!("Copying file {:?} to {:?}", source, dest);
        fs::copy(source, dest)
            .with_context(|| format!("Failed to copy file {:?} to {:?}", source, dest))?;
    }
    info!("Copied {:?} to {:?}", source, dest);
    Ok(())
}
