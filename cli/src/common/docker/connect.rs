//! # ueci Docker Connection
//!
//! File: cli/src/common/docker/connect.rs
//!
//! ## Overview
//!
//! Opens a `bollard` client using the platform defaults (the Unix socket or the
//! Windows named pipe, honouring `DOCKER_HOST`). Every other Docker helper starts
//! by calling `connect_docker`; the client is cheap to create, so no connection
//! is cached between calls.
//!
//! Also hosts `map_not_found`, which turns the daemon's 404 responses into the
//! "not found" variants of `UeciError`.
//!
use crate::core::error::{Result, UeciError};
use anyhow::{anyhow, Context};
use bollard::Docker;
use tracing::instrument;

/// Connects to the local Docker daemon.
///
/// # Errors
///
/// Returns `UeciError::DockerApi` if the client cannot be configured.
#[instrument]
pub async fn connect_docker() -> Result<Docker> {
    Docker::connect_with_local_defaults()
        .map_err(|e| anyhow!(UeciError::DockerApi { source: e }))
        .context("Failed to connect to Docker daemon. Is it running and accessible?")
}

/// Converts a bollard error into an `anyhow::Error`, using `not_found` for HTTP 404 responses.
pub(crate) fn map_not_found(
    err: bollard::errors::Error,
    not_found: UeciError,
    action: &str,
) -> anyhow::Error {
    match err {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        } => anyhow!(not_found),
        other => anyhow!(UeciError::DockerApi { source: other }).context(action.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_not_found_404() {
        let err = bollard::errors::Error::DockerResponseServerError {
            status_code: 404,
            message: "No such container".to_string(),
        };
        let mapped = map_not_found(
            err,
            UeciError::ContainerNotFound {
                name: "ci-1".to_string(),
            },
            "inspect",
        );
        assert!(matches!(
            mapped.downcast_ref::<UeciError>(),
            Some(UeciError::ContainerNotFound { .. })
        ));
    }

    #[test]
    fn test_map_not_found_other_status() {
        let err = bollard::errors::Error::DockerResponseServerError {
            status_code: 500,
            message: "boom".to_string(),
        };
        let mapped = map_not_found(
            err,
            UeciError::ImageNotFound {
                name: "img".to_string(),
            },
            "Failed to inspect image 'img'",
        );
        assert!(matches!(
            mapped.downcast_ref::<UeciError>(),
            Some(UeciError::DockerApi { .. })
        ));
        assert_eq!(mapped.to_string(), "Failed to inspect image 'img'");
    }

    #[tokio::test]
    #[ignore] // Requires a running Docker daemon
    async fn test_connect_docker_and_ping() {
        let docker = connect_docker().await.expect("client");
        assert!(docker.ping().await.is_ok());
    }
}
