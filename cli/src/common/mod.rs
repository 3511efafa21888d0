//! # ueci Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared wrappers around the tools and services a CI job talks to. Each
//! submodule is a set of free functions with no internal state; command
//! handlers (`commands::`) and the packaging pipeline (`packaging::`) call them
//! directly.
//!
//! ## Architecture
//!
//! - **`archive`**: zip / tar / gzipped tar creation and extraction.
//! - **`cache`**: picks the cheapest available source of a resource.
//! - **`conan`**: copies package contents out of the Conan cache.
//! - **`docker`**: CI worker containers via `bollard`.
//! - **`engine`**: engine root lookup and plugin installation.
//! - **`fs`**: copy, remove, pattern-based removal, file I/O.
//! - **`git`**: branch, tag, commit date and remote queries.
//! - **`network`**: HTTP availability checks and downloads.
//! - **`process`**: running external commands.
//! - **`storage`**: cloud object storage upload/download.
//! - **`system`**: host platform identification.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::{archive, fs, git};
//! # fn run_example() -> crate::core::error::Result<()> {
//! let repo = std::path::Path::new(".");
//! let date = git::commit_date(repo)?;
//! fs::io::ensure_dir_exists(std::path::Path::new("dist"))?;
//! archive::compress(std::path::Path::new(&date), archive::ArchiveFormat::Zip, std::path::Path::new("dist"))?;
//! # Ok(())
//! # }
//! ```
//!

/// Archive creation and extraction.
pub mod archive;
/// Cheapest-source selection.
pub mod cache;
/// Conan package cache access.
pub mod conan;
/// Docker container and image helpers.
pub mod docker;
/// Unreal Engine installation helpers.
pub mod engine;
/// Filesystem operations.
pub mod fs;
/// Git CLI queries.
pub mod git;
/// HTTP helpers.
pub mod network;
/// External process execution.
pub mod process;
/// Cloud object storage.
pub mod storage;
/// Host platform identification.
pub mod system;
