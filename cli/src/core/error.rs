//! # ueci Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout ueci. Errors are grouped
//! by what went wrong rather than by which wrapper raised them:
//!
//! - **Not found**: a descriptor file, a version string, an available cache
//!   source, a container or an image could not be located.
//! - **External command**: a build tool, Git, Conan or container command exited
//!   with a non-zero status. The status and any captured output are kept.
//! - **Filesystem**: a path could not be copied, removed or created.
//! - **Configuration**, **Docker**, **Storage** and **Archive** failures.
//!
//! `UeciError` is raised with `anyhow!`/`bail!` and travels inside
//! `anyhow::Error`, so callers that care about a specific condition can
//! `downcast_ref::<UeciError>()`.
//!
//! ## Examples
//!
//! ```rust
//! match Descriptor::from_directory(root, ".uproject") {
//!     Ok(descriptor) => println!("Found {}", descriptor.name()),
//!     Err(e) if matches!(e.downcast_ref::<UeciError>(), Some(UeciError::DescriptorNotFound { .. })) => {
//!         println!("Not an Unreal project directory");
//!     }
//!     Err(e) => return Err(e),
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for ueci.
#[derive(Error, Debug)]
pub enum UeciError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Could not find a `{extension}` descriptor file in the directory \"{directory}\"")]
    DescriptorNotFound {
        extension: String,
        directory: String,
    },

    #[error("Version string not available: {0}")]
    VersionUnavailable(String),

    #[error("None of the specified sources are available: {sources:?}")]
    NoSourceAvailable { sources: Vec<String> },

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Docker error: {0}")]
    Docker(String),

    #[error("Docker API interaction failed: {source}")]
    DockerApi {
        #[from]
        source: bollard::errors::Error,
    },

    #[error("Container '{name}' not found.")]
    ContainerNotFound { name: String },

    #[error("Image '{name}' not found.")]
    ImageNotFound { name: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("External command failed: {cmd}, Status: {status}, Output:\n{output}")]
    ExternalCommand {
        cmd: String,
        status: String,
        output: String,
    },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
