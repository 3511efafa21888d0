//! # ueci Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers shared by the packager and the collaborator commands.
//!
//! ## Architecture
//!
//! - **`copy`**: `copy_path` for single files or whole trees (via `fs_extra`).
//! - **`io`**: directory creation, whole-file read/write, `remove_path` and `is_uri`.
//! - **`matching`**: `remove_matching`, the glob-driven recursive delete used to
//!   strip debug symbols and manifests from a distribution.
//!
//! Callers import the submodule they need, e.g.
//! `crate::common::fs::io::remove_path`.
//!
//! ```rust
//! use crate::common::fs::{copy, io, matching};
//! # fn run_example() -> crate::core::error::Result<()> {
//! let dist = std::path::Path::new("dist");
//! io::ensure_dir_exists(dist)?;
//! copy::copy_path(std::path::Path::new("LICENSE"), &dist.join("LICENSE"))?;
//! let removed = matching::remove_matching(dist, &["*.pdb"])?;
//! # Ok(())
//! # }
//! ```
//!

/// File and directory tree copying.
pub mod copy;
/// Basic file I/O and path helpers.
pub mod io;
/// Glob-based recursive removal.
pub mod matching;
