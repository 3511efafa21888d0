//! # ueci Cloud Storage Utilities (`common::storage`)
//!
//! File: cli/src/common/storage.rs
//!
//! ## Overview
//!
//! Uploads and downloads single objects in Google Cloud Storage through its JSON
//! API, using `reqwest`:
//!
//! - upload: `POST {endpoint}/upload/storage/v1/b/{bucket}/o?uploadType=media&name={key}`
//! - download: `GET {endpoint}/storage/v1/b/{bucket}/o/{key}?alt=media`
//!
//! Authentication is an OAuth2 bearer token read from the environment variable
//! named by `[storage] token_env` (by default `GOOGLE_OAUTH_ACCESS_TOKEN`, e.g.
//! filled from `gcloud auth print-access-token`). When the variable is unset,
//! requests go out anonymously, which works for public buckets only.
//!
//! The endpoint is configurable so the same code can target an emulator.
//!
use crate::common::network;
use crate::core::config::StorageConfig;
use crate::core::error::{Result, UeciError};
use anyhow::{anyhow, Context};
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// A configured connection to the object storage JSON API.
#[derive(Debug, Clone)]
pub struct StorageClient {
    endpoint: Url,
    token: Option<String>,
    http: reqwest::Client,
}

impl StorageClient {
    /// Creates a client from the `[storage]` configuration table, reading the token from the environment.
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        let token = std::env::var(&config.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty());
        if token.is_none() {
            warn!(
                "Environment variable {} is not set; storage requests will be unauthenticated.",
                config.token_env
            );
        }
        Self::new(&config.endpoint, token)
    }

    /// Creates a client for `endpoint` with an optional bearer token.
    pub fn new(endpoint: &str, token: Option<String>) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            anyhow!(UeciError::Config(format!(
                "Invalid storage endpoint '{}': {}",
                endpoint, e
            )))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(anyhow!(UeciError::Config(format!(
                "Storage endpoint '{}' cannot be used as a base URL",
                endpoint
            ))));
        }
        Ok(Self {
            endpoint,
            token,
            http: network::client()?,
        })
    }

    fn url_with_segments(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!(UeciError::Config("Invalid storage endpoint".to_string())))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL for a media upload of `key` into `bucket`.
    pub fn upload_url(&self, bucket: &str, key: &str) -> Result<Url> {
        let mut url = self.url_with_segments(&["upload", "storage", "v1", "b", bucket, "o"])?;
        url.query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", key);
        Ok(url)
    }

    /// URL for downloading the contents of `key` from `bucket`.
    pub fn download_url(&self, bucket: &str, key: &str) -> Result<Url> {
        let mut url = self.url_with_segments(&["storage", "v1", "b", bucket, "o", key])?;
        url.query_pairs_mut().append_pair("alt", "media");
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Uploads the file at `filename` as object `key` in `bucket`, replacing any existing object.
    #[instrument(skip(self), fields(filename = %filename.display()))]
    pub async fn upload_file(&self, bucket: &str, key: &str, filename: &Path) -> Result<()> {
        let data = tokio::fs::read(filename)
            .await
            .with_context(|| format!("Failed to read {:?} for upload", filename))?;
        let url = self.upload_url(bucket, key)?;
        debug!("POST {} ({} bytes)", url, data.len());

        let response = self
            .authorize(self.http.post(url))
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(data)
            .send()
            .await
            .with_context(|| format!("Failed to upload to gs://{}/{}", bucket, key))?;
        check_status(response, bucket, key).await?;
        info!("Uploaded {:?} to gs://{}/{}", filename, bucket, key);
        Ok(())
    }

    /// Downloads object `key` from `bucket` into the file `filename`.
    #[instrument(skip(self), fields(filename = %filename.display()))]
    pub async fn download_file(&self, bucket: &str, key: &str, filename: &Path) -> Result<()> {
        let url = self.download_url(bucket, key)?;
        debug!("GET {}", url);
        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .with_context(|| format!("Failed to download gs://{}/{}", bucket, key))?;
        let response = check_status(response, bucket, key).await?;
        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read body of gs://{}/{}", bucket, key))?;
        tokio::fs::write(filename, &bytes)
            .await
            .with_context(|| format!("Failed to write {:?}", filename))?;
        info!("Downloaded gs://{}/{} to {:?}", bucket, key, filename);
        Ok(())
    }
}

/// Turns non-success responses into `UeciError::Storage`, keeping the server's message.
async fn check_status(response: Response, bucket: &str, key: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let reason = if status == StatusCode::NOT_FOUND {
        "object or bucket not found".to_string()
    } else {
        format!("HTTP {}", status)
    };
    Err(anyhow!(UeciError::Storage(format!(
        "gs://{}/{}: {}{}",
        bucket,
        key,
        reason,
        if body.trim().is_empty() {
            String::new()
        } else {
            format!(": {}", body.trim())
        }
    ))))
}

/// Uploads a file to cloud storage using the `[storage]` configuration.
pub async fn upload_file(config: &StorageConfig, bucket: &str, key: &str, filename: &Path) -> Result<()> {
    StorageClient::from_config(config)?
        .upload_file(bucket, key, filename)
        .await
}

/// Downloads a file from cloud storage using the `[storage]` configuration.
pub async fn download_file(
    config: &StorageConfig,
    bucket: &str,
    key: &str,
    filename: &Path,
) -> Result<()> {
    StorageClient::from_config(config)?
        .download_file(bucket, key, filename)
        .await
}
