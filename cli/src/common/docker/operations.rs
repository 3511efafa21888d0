//! # ueci Docker Image Builds
//!
//! File: cli/src/common/docker/operations.rs
//!
//! ## Overview
//!
//! `build_image` sends a build context directory to the daemon as a gzipped
//! tarball (via `common::archive::tar`), prints build progress as it streams
//! back, and returns the ID of the resulting image.
//!
//! Each event from the daemon's build stream is classified by
//! `classify_build_event`:
//! - `stream` / `status` text (plus any `progress` bar) is printed.
//! - `error` aborts the build with `UeciError::Docker`.
//! - `aux.ID` carries the final image ID.
//!
//! ```rust
//! use crate::common::docker::operations;
//! # async fn run_example() -> crate::core::error::Result<()> {
//! let image_id = operations::build_image(std::path::Path::new("docker/ci"), "ci:latest", "Dockerfile", false).await?;
//! # Ok(())
//! # }
//! ```
//!
use crate::common::archive::tar::tar_bytes;
use crate::core::error::{Result, UeciError};
use anyhow::{anyhow, Context};
use bollard::image::BuildImageOptions;
use bollard::models::BuildInfo;
use futures_util::stream::StreamExt;
use std::io::{stdout, Write};
use std::path::Path;
use tracing::{debug, error, info, instrument};

use super::connect::connect_docker;

/// What a single build stream event means for the caller.
#[derive(Debug, PartialEq, Eq)]
pub enum BuildEvent {
    /// A line of progress output to display.
    Output(String),
    /// The daemon reported the ID of the built image.
    ImageId(String),
    /// Whitespace or an event with nothing to show.
    Ignored,
}

/// Classifies one build stream event, turning daemon-reported errors into `Err`.
pub fn classify_build_event(info: BuildInfo) -> Result<BuildEvent> {
    if let Some(err) = info.error {
        let detail = info
            .error_detail
            .and_then(|d| d.message)
            .filter(|m| m != &err)
            .map(|m| format!(" ({})", m))
            .unwrap_or_default();
        return Err(anyhow!(UeciError::Docker(format!(
            "Docker build failed with error: {}{}",
            err, detail
        ))));
    }

    let text = info
        .stream
        .as_deref()
        .or(info.status.as_deref())
        .unwrap_or("")
        .trim();
    if !text.is_empty() {
        let progress = info.progress.as_deref().unwrap_or("").trim();
        return Ok(BuildEvent::Output(if progress.is_empty() {
            text.to_string()
        } else {
            format!("{} {}", text, progress)
        }));
    }

    if let Some(id) = info.aux.and_then(|aux| aux.id) {
        return Ok(BuildEvent::ImageId(id));
    }
    Ok(BuildEvent::Ignored)
}

/// Builds an image from `context_dir`, printing progress, and returns the image ID.
///
/// # Arguments
///
/// * `context_dir` - Build context directory.
/// * `tag` - Name and tag for the image, e.g. `ci-worker:latest`.
/// * `dockerfile` - Dockerfile path relative to the context.
/// * `no_cache` - Disables the layer cache.
///
/// # Returns
///
/// `Some(image_id)` once the daemon reports it, `None` if it never does.
#[instrument(fields(context_dir = %context_dir.display()))]
pub async fn build_image(
    context_dir: &Path,
    tag: &str,
    dockerfile: &str,
    no_cache: bool,
) -> Result<Option<String>> {
    let docker = connect_docker().await?;
    info!("Creating build context tarball for '{}'...", context_dir.display());
    let context = tar_bytes(context_dir, true).context("Failed to create build context tarball")?;

    let options = BuildImageOptions {
        dockerfile: dockerfile.to_string(),
        t: tag.to_string(),
        rm: true,
        nocache: no_cache,
        ..Default::default()
    };
    let mut build_stream = docker.build_image(options, None, Some(context.into()));

    let mut image_id = None;
    let mut out = stdout();
    while let Some(event) = build_stream.next().await {
        let info = event
            .map_err(|e| anyhow!(UeciError::DockerApi { source: e }))
            .context("Failed to process build stream event")?;
        match classify_build_event(info) {
            Ok(BuildEvent::Output(line)) => {
                let _ = writeln!(out, "{}", line);
                let _ = out.flush();
            }
            Ok(BuildEvent::ImageId(id)) => {
                debug!("Build produced image {}", id);
                image_id = Some(id);
            }
            Ok(BuildEvent::Ignored) => {}
            Err(e) => {
                error!("{:#}", e);
                return Err(e);
            }
        }
    }

    info!("Image build finished for tag '{}' ({:?})", tag, image_id);
    Ok(image_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bollard::models::{ErrorDetail, ImageId};

    #[test]
    fn test_classify_stream_and_status() -> Result<()> {
        let stream = BuildInfo {
            stream: Some("Step 1/3 : FROM ubuntu\n".to_string()),
            ..Default::default()
        };
        assert_eq!(
            classify_build_event(stream)?,
            BuildEvent::Output("Step 1/3 : FROM ubuntu".to_string())
        );

        let status = BuildInfo {
            status: Some("Downloading".to_string()),
            progress: Some("[==>   ] 1MB/5MB".to_string()),
            ..Default::default()
        };
        assert_eq!(
            classify_build_event(status)?,
            BuildEvent::Output("Downloading [==>   ] 1MB/5MB".to_string())
        );

        let blank = BuildInfo {
            stream: Some("\n".to_string()),
            ..Default::default()
        };
        assert_eq!(classify_build_event(blank)?, BuildEvent::Ignored);
        Ok(())
    }

    #[test]
    fn test_classify_aux_id() -> Result<()> {
        let aux = BuildInfo {
            aux: Some(ImageId {
                id: Some("sha256:abc".to_string()),
            }),
            ..Default::default()
        };
        assert_eq!(
            classify_build_event(aux)?,
            BuildEvent::ImageId("sha256:abc".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_classify_error() {
        let failed = BuildInfo {
            error: Some("returned a non-zero code: 1".to_string()),
            error_detail: Some(ErrorDetail {
                code: Some(1),
                message: Some("returned a non-zero code: 1".to_string()),
            }),
            ..Default::default()
        };
        let err = classify_build_event(failed).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Docker error: Docker build failed with error: returned a non-zero code: 1"
        );
    }
}
