//! # ueci Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//!
//! ## Overview
//!
//! HTTP helpers built on `reqwest`:
//!
//! - **`uri_available`**: a `HEAD` request (following redirects) that reports
//!   whether a remote resource currently answers with `200 OK`. Every failure,
//!   including DNS and connection errors, counts as "not available".
//! - **`download_to_file`**: streams a `GET` response body to a local file.
//!
//! Both are used by the cache selector and by archive extraction for remote
//! archives. No request is retried.
//!
use crate::core::error::Result;
use anyhow::Context;
use reqwest::StatusCode;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

/// Builds the shared client configuration used by this module.
pub(crate) fn client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("ueci/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

/// Returns `true` if a `HEAD` request to `uri` (after redirects) responds with `200 OK`.
#[instrument]
pub async fn uri_available(uri: &str) -> bool {
    let client = match client() {
        Ok(c) => c,
        Err(e) => {
            debug!("HTTP client unavailable: {:#}", e);
            return false;
        }
    };
    match client.head(uri).send().await {
        Ok(response) => {
            debug!("HEAD {} -> {}", uri, response.status());
            response.status() == StatusCode::OK
        }
        Err(e) => {
            debug!("HEAD {} failed: {}", uri, e);
            false
        }
    }
}

/// Downloads `uri` to `path`, overwriting any existing file.
///
/// # Errors
///
/// * The request fails or the server answers with a non-success status.
/// * The destination file cannot be created or written.
#[instrument(fields(path = %path.display()))]
pub async fn download_to_file(uri: &str, path: &Path) -> Result<()> {
    info!("Downloading {} ...", uri);
    let mut response = client()?
        .get(uri)
        .send()
        .await
        .with_context(|| format!("Failed to request {}", uri))?
        .error_for_status()
        .with_context(|| format!("Server rejected download of {}", uri))?;

    let mut file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create {:?}", path))?;
    let mut written: u64 = 0;
    while let Some(chunk) = response
        .chunk()
        .await
        .with_context(|| format!("Failed while reading body of {}", uri))?
    {
        file.write_all(&chunk)
            .await
            .with_context(|| format!("Failed to write to {:?}", path))?;
        written += chunk.len() as u64;
    }
    file.flush()
        .await
        .with_context(|| format!("Failed to flush {:?}", path))?;
    debug!("Downloaded {} bytes to {:?}", written, path);
    Ok(())
}
