//! # ueci Docker Module Interface
//!
//! File: cli/src/common/docker/mod.rs
//!
//! ## Overview
//!
//! Wrappers over the `bollard` Docker Engine client for CI worker containers:
//! build an image, start a container that idles, run commands in it, move files
//! in and out, stop it.
//!
//! ## Architecture
//!
//! - **`connect`**: client creation and 404 → "not found" error mapping.
//! - **`images`**: listing (with tag patterns) and image platform lookup.
//! - **`operations`**: image builds with streamed progress.
//! - **`lifecycle`**: start-for-exec, stop, container platform, per-platform
//!   workspace and shell defaults.
//! - **`interaction`**: `exec`, `exec_multiple` and in-container `glob`.
//! - **`transfer`**: host ⇄ container copies.
//!
//! The most used functions are re-exported here.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::docker;
//! # async fn run_example() -> crate::core::error::Result<()> {
//! let id = docker::start_for_exec("adamrehn/ue4-full:4.27.2", None).await?;
//! let platform = docker::container_platform(&id).await?;
//! let workspace = docker::workspace_dir(&platform);
//! docker::copy_from_host(&id, std::path::Path::new("Game"), workspace).await?;
//! docker::exec(&id, &["ue4".to_string(), "package".to_string()], false).await?;
//! docker::stop_container(&id, None).await?;
//! # Ok(())
//! # }
//! ```
//!

/// Docker client creation.
pub mod connect;
/// Image listing and inspection.
pub mod images;
/// Command execution inside containers.
pub mod interaction;
/// Container start/stop and platform defaults.
pub mod lifecycle;
/// Image builds.
pub mod operations;
/// Host/container file copies.
pub mod transfer;

pub use images::list_images;
pub use interaction::{exec, exec_multiple, glob};
pub use lifecycle::{container_platform, shell_prefix, start_for_exec, stop_container, workspace_dir};
pub use operations::build_image;
pub use transfer::{copy_from_host, copy_to_host};
