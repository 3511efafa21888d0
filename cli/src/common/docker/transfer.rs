//! # ueci Docker File Transfer
//!
//! File: cli/src/common/docker/transfer.rs
//!
//! ## Overview
//!
//! Copies files between the host and a container through the Engine API's
//! archive endpoints, which exchange uncompressed tar streams.
//!
//! - **`copy_from_host`**: a host file or directory into a container directory.
//!   A directory's contents land directly in the target directory; a single file
//!   lands there under its own name.
//! - **`copy_to_host`**: a container file or directory into a host directory.
//!   The downloaded tar is unpacked without clearing the destination first.
//!
use crate::common::archive::tar::{tar_bytes, unpack_tar};
use crate::common::fs::io::ensure_dir_exists;
use crate::core::error::{Result, UeciError};
use anyhow::{anyhow, Context};
use bollard::container::{DownloadFromContainerOptions, UploadToContainerOptions};
use futures_util::TryStreamExt;
use std::path::Path;
use tracing::{debug, info, instrument};

use super::connect::{connect_docker, map_not_found};

/// Copies `host_path` into the directory `container_path` inside `container`.
#[instrument(fields(host_path = %host_path.display()))]
pub async fn copy_from_host(container: &str, host_path: &Path, container_path: &str) -> Result<()> {
    let archive = tar_bytes(host_path, false)
        .with_context(|| format!("Failed to archive {:?} for upload", host_path))?;
    debug!("Uploading {} bytes to {}:{}", archive.len(), container, container_path);

    let docker = connect_docker().await?;
    docker
        .upload_to_container(
            container,
            Some(UploadToContainerOptions {
                path: container_path.to_string(),
                ..Default::default()
            }),
            archive.into(),
        )
        .await
        .map_err(|e| {
            map_not_found(
                e,
                UeciError::ContainerNotFound {
                    name: container.to_string(),
                },
                &format!("Failed to copy {:?} into container", host_path),
            )
        })?;
    info!("Copied {:?} to {}:{}", host_path, container, container_path);
    Ok(())
}

/// Copies `container_path` from `container` into the host directory `host_path`.
#[instrument(fields(host_path = %host_path.display()))]
pub async fn copy_to_host(container: &str, container_path: &str, host_path: &Path) -> Result<()> {
    let docker = connect_docker().await?;
    let chunks: Vec<_> = docker
        .download_from_container(
            container,
            Some(DownloadFromContainerOptions {
                path: container_path.to_string(),
            }),
        )
        .try_collect()
        .await
        .map_err(|e| {
            map_not_found(
                e,
                UeciError::ContainerNotFound {
                    name: container.to_string(),
                },
                &format!("Failed to copy '{}' out of container", container_path),
            )
        })?;
    let archive: Vec<u8> = chunks.iter().flat_map(|c| c.iter().copied()).collect();
    if archive.is_empty() {
        return Err(anyhow!(UeciError::Docker(format!(
            "Container returned no data for '{}'",
            container_path
        ))));
    }

    ensure_dir_exists(host_path)?;
    unpack_tar(archive.as_slice(), host_path)?;
    info!("Copied {}:{} to {:?}", container, container_path, host_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    #[ignore] // Requires a running Docker daemon and the ubuntu:22.04 image
    async fn test_copy_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("notes.txt");
        fs::write(&file, "hello container")?;

        let id = super::super::lifecycle::start_for_exec("ubuntu:22.04", None).await?;
        copy_from_host(&id, &file, "/tmp").await?;
        let out = dir.path().join("back");
        copy_to_host(&id, "/tmp/notes.txt", &out).await?;
        super::super::lifecycle::stop_container(&id, None).await?;

        assert_eq!(fs::read_to_string(out.join("notes.txt"))?, "hello container");
        Ok(())
    }
}
