//! # ueci Docker Image Queries
//!
//! File: cli/src/common/docker/images.rs
//!
//! ## Overview
//!
//! - **`list_images`**: lists local images, optionally keeping only those with at
//!   least one repository tag matching a shell-style pattern (`ue4-full:4.2*`).
//! - **`image_platform`**: the OS an image targets (`linux`, `windows`). Used to
//!   pick platform-specific commands when starting containers from it.
//!
use crate::core::error::{Result, UeciError};
use anyhow::anyhow;
use bollard::image::ListImagesOptions;
use bollard::models::ImageSummary;
use glob::Pattern;
use tracing::{debug, info, instrument};

use super::connect::{connect_docker, map_not_found};

/// Keeps the images that have a repository tag matching `tag_filter`.
///
/// Untagged images never match.
pub fn filter_by_tag(images: Vec<ImageSummary>, tag_filter: &str) -> Result<Vec<ImageSummary>> {
    let pattern = Pattern::new(tag_filter).map_err(|e| {
        anyhow!(UeciError::Docker(format!(
            "Invalid tag filter '{}': {}",
            tag_filter, e
        )))
    })?;
    Ok(images
        .into_iter()
        .filter(|image| image.repo_tags.iter().any(|tag| pattern.matches(tag)))
        .collect())
}

/// Lists local images, optionally filtered by a tag pattern.
#[instrument]
pub async fn list_images(tag_filter: Option<&str>) -> Result<Vec<ImageSummary>> {
    let docker = connect_docker().await?;
    let images = docker
        .list_images(Some(ListImagesOptions::<String> {
            all: false,
            ..Default::default()
        }))
        .await
        .map_err(|e| anyhow!(UeciError::DockerApi { source: e }))?;
    debug!("Docker reported {} images", images.len());

    match tag_filter {
        Some(filter) => {
            let matched = filter_by_tag(images, filter)?;
            info!("{} images match tag filter '{}'", matched.len(), filter);
            Ok(matched)
        }
        None => Ok(images),
    }
}

/// Returns the operating system the image was built for (e.g. `linux`, `windows`).
///
/// # Errors
///
/// * `UeciError::ImageNotFound` if the image does not exist locally.
/// * `UeciError::Docker` if the daemon does not report an OS for it.
#[instrument]
pub async fn image_platform(image: &str) -> Result<String> {
    let docker = connect_docker().await?;
    let details = docker.inspect_image(image).await.map_err(|e| {
        map_not_found(
            e,
            UeciError::ImageNotFound {
                name: image.to_string(),
            },
            &format!("Failed to inspect image '{}'", image),
        )
    })?;
    details.os.ok_or_else(|| {
        anyhow!(UeciError::Docker(format!(
            "Image '{}' does not report a platform",
            image
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: &str, tags: &[&str]) -> ImageSummary {
        ImageSummary {
            id: id.to_string(),
            repo_tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_filter_by_tag() -> Result<()> {
        let images = vec![
            image("a", &["adamrehn/ue4-full:4.27.2"]),
            image("b", &["adamrehn/ue4-minimal:4.27.2", "mirror/ue4-full:5.0"]),
            image("c", &[]),
            image("d", &["ubuntu:22.04"]),
        ];
        let matched: Vec<String> = filter_by_tag(images, "*/ue4-full:*")?
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(matched, vec!["a".to_string(), "b".to_string()]);
        Ok(())
    }

    #[test]
    fn test_filter_by_tag_invalid_pattern() {
        assert!(filter_by_tag(vec![], "[").is_err());
    }

    #[tokio::test]
    #[ignore] // Requires a running Docker daemon
    async fn test_image_platform_missing_image() {
        let err = image_platform("ueci-definitely-missing:never").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<UeciError>(),
            Some(UeciError::ImageNotFound { .. })
        ));
    }
}
