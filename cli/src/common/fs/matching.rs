//! # ueci Pattern-Based Removal
//!
//! File: cli/src/common/fs/matching.rs
//!
//! ## Overview
//!
//! `remove_matching` walks a directory tree and deletes every file or directory
//! whose *name* matches one of a set of shell-style glob patterns (`*.pdb`,
//! `Manifest_*.txt`, ...). Matching follows the host's filesystem convention:
//! case-insensitive on Windows, case-sensitive elsewhere.
//!
//! Matched directories are removed whole and not descended into. The removed
//! paths are returned in walk order so the caller can report them.
//!
use crate::core::error::{Result, UeciError};
use anyhow::{anyhow, Context};
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use super::io::remove_path;

/// Name matching options for the current host.
fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: !cfg!(windows),
        ..MatchOptions::new()
    }
}

/// Compiles a list of glob patterns, failing on the first invalid one.
fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p.as_ref()).map_err(|e| {
                anyhow!(UeciError::FileSystem(format!(
                    "Invalid file pattern '{}': {}",
                    p.as_ref(),
                    e
                )))
            })
        })
        .collect()
}

/// Recursively removes files and directories under `root` whose names match any of `patterns`.
///
/// # Arguments
///
/// * `root` - Directory to search. A missing root yields an empty result.
/// * `patterns` - Glob patterns matched against the entry's file name only.
///
/// # Returns
///
/// The paths that were removed.
///
/// # Errors
///
/// * An invalid glob pattern.
/// * Failure to read a directory or to delete a matched entry.
#[instrument(skip(patterns), fields(root = %root.display()))]
pub fn remove_matching<S: AsRef<str>>(root: &Path, patterns: &[S]) -> Result<Vec<PathBuf>> {
    let compiled = compile_patterns(patterns)?;
    if !root.exists() || compiled.is_empty() {
        return Ok(Vec::new());
    }

    let options = match_options();
    let mut removed = Vec::new();
    let mut walker = WalkDir::new(root).min_depth(1).into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry.with_context(|| format!("Failed to walk directory {:?}", root))?;
        let name = entry.file_name().to_string_lossy();
        if !compiled.iter().any(|p| p.matches_with(&name, options)) {
            continue;
        }
        if entry.file_type().is_dir() {
            walker.skip_current_dir();
        }
        debug!("Removing matched entry {:?}", entry.path());
        remove_path(entry.path())?;
        removed.push(entry.into_path());
    }
    Ok(removed)
}
