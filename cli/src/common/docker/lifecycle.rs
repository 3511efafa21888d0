//! # ueci Docker Container Lifecycle
//!
//! File: cli/src/common/docker/lifecycle.rs
//!
//! ## Overview
//!
//! Containers used by CI scripts are throwaway workers: started from an image
//! with a command that blocks forever, driven with `exec`, then stopped. They are
//! created with auto-remove, so stopping one also deletes it.
//!
//! Windows containers need a different blocking command, an open stdin and a
//! TTY, and use different workspace paths and shells. The platform-specific
//! choices live in small pure functions keyed on the platform string Docker
//! reports (`windows` or anything else).
//!
//! ## Functions
//!
//! - **`start_for_exec`**: create + start, returns the container ID.
//! - **`stop_container`**: stop with a timeout (default 1 second). 304 is success.
//! - **`container_platform`**: the `Platform` reported by `inspect_container`.
//! - **`workspace_dir`** / **`shell_prefix`**: per-platform defaults.
//!
use crate::core::error::{Result, UeciError};
use anyhow::anyhow;
use bollard::container::{
    Config as ContainerConfig, CreateContainerOptions, InspectContainerOptions,
    StartContainerOptions, StopContainerOptions,
};
use bollard::models::HostConfig;
use tracing::{info, instrument, warn};

use super::connect::{connect_docker, map_not_found};
use super::images::image_platform;

/// Default number of seconds Docker waits before killing a container being stopped.
pub const DEFAULT_STOP_TIMEOUT: i64 = 1;

fn is_windows(platform: &str) -> bool {
    platform.eq_ignore_ascii_case("windows")
}

/// Returns a command that blocks indefinitely on the given platform.
pub fn blocking_command(platform: &str) -> Vec<String> {
    let parts: &[&str] = if is_windows(platform) {
        &["timeout", "/t", "99999", "/nobreak"]
    } else {
        &["bash", "-c", "sleep infinity"]
    };
    parts.iter().map(|s| s.to_string()).collect()
}

/// Returns a platform-appropriate workspace directory inside a container.
pub fn workspace_dir(platform: &str) -> &'static str {
    if is_windows(platform) {
        "C:\\workspace"
    } else {
        "/tmp/workspace"
    }
}

/// Returns the command prefix for running a shell command line inside a container.
pub fn shell_prefix(platform: &str) -> Vec<String> {
    let parts: &[&str] = if is_windows(platform) {
        &["cmd", "/S", "/C"]
    } else {
        &["bash", "-c"]
    };
    parts.iter().map(|s| s.to_string()).collect()
}

/// Starts a detached, auto-removing container from `image` that idles until stopped.
///
/// # Arguments
///
/// * `image` - Image to run. Its platform selects the blocking command.
/// * `name` - Optional container name.
///
/// # Returns
///
/// The new container's ID.
#[instrument]
pub async fn start_for_exec(image: &str, name: Option<&str>) -> Result<String> {
    let platform = image_platform(image).await?;
    let windows = is_windows(&platform);
    let docker = connect_docker().await?;

    let config = ContainerConfig {
        image: Some(image.to_string()),
        cmd: Some(blocking_command(&platform)),
        open_stdin: Some(windows),
        tty: Some(windows),
        host_config: Some(HostConfig {
            auto_remove: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    };
    let options = name.map(|n| CreateContainerOptions {
        name: n.to_string(),
        platform: None,
    });

    let created = docker
        .create_container(options, config)
        .await
        .map_err(|e| {
            map_not_found(
                e,
                UeciError::ImageNotFound {
                    name: image.to_string(),
                },
                &format!("Failed to create container from image '{}'", image),
            )
        })?;
    for warning in &created.warnings {
        warn!("Docker: {}", warning);
    }

    docker
        .start_container(&created.id, None::<StartContainerOptions<String>>)
        .await
        .map_err(|e| anyhow!(UeciError::DockerApi { source: e }))?;
    info!(
        "Started {} container {} from image '{}'",
        platform, created.id, image
    );
    Ok(created.id)
}

/// Stops a container started by `start_for_exec` (which also removes it).
#[instrument]
pub async fn stop_container(container: &str, timeout_secs: Option<i64>) -> Result<()> {
    let docker = connect_docker().await?;
    let t = timeout_secs.unwrap_or(DEFAULT_STOP_TIMEOUT);
    info!("Stopping Docker container {}...", container);

    match docker
        .stop_container(container, Some(StopContainerOptions { t }))
        .await
    {
        Ok(()) => Ok(()),
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 304, ..
        }) => {
            info!("Container '{}' was already stopped.", container);
            Ok(())
        }
        Err(e) => Err(map_not_found(
            e,
            UeciError::ContainerNotFound {
                name: container.to_string(),
            },
            &format!("Failed to stop container '{}'", container),
        )),
    }
}

/// Returns the platform identifier (`linux`, `windows`) of a running container.
#[instrument]
pub async fn container_platform(container: &str) -> Result<String> {
    let docker = connect_docker().await?;
    let details = docker
        .inspect_container(container, None::<InspectContainerOptions>)
        .await
        .map_err(|e| {
            map_not_found(
                e,
                UeciError::ContainerNotFound {
                    name: container.to_string(),
                },
                &format!("Failed to inspect container '{}'", container),
            )
        })?;
    details.platform.ok_or_else(|| {
        anyhow!(UeciError::Docker(format!(
            "Container '{}' does not report a platform",
            container
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocking_command_per_platform() {
        assert_eq!(
            blocking_command("windows"),
            vec!["timeout", "/t", "99999", "/nobreak"]
        );
        assert_eq!(blocking_command("linux"), vec!["bash", "-c", "sleep infinity"]);
    }

    #[test]
    fn test_workspace_dir_and_shell_prefix() {
        assert_eq!(workspace_dir("windows"), "C:\\workspace");
        assert_eq!(workspace_dir("linux"), "/tmp/workspace");
        assert_eq!(shell_prefix("Windows"), vec!["cmd", "/S", "/C"]);
        assert_eq!(shell_prefix("linux"), vec!["bash", "-c"]);
    }

    #[tokio::test]
    #[ignore] // Requires a running Docker daemon
    async fn test_stop_missing_container() {
        let err = stop_container("ueci-no-such-container", None).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<UeciError>(),
            Some(UeciError::ContainerNotFound { .. })
        ));
    }
}
