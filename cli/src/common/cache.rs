//! # ueci Cache Source Selection (`common::cache`)
//!
//! File: cli/src/common/cache.rs
//!
//! ## Overview
//!
//! CI jobs often have several places a resource could come from: a local
//! cache directory, a mirror on the LAN, the canonical remote. Callers list them
//! cheapest-first and `select_cheapest` returns the first one that is available
//! right now.
//!
//! A source is either a URI (checked with an HTTP `HEAD`, see
//! `common::network::uri_available`) or a local path (checked for existence).
//!
use crate::common::fs::io::is_uri;
use crate::common::network;
use crate::core::error::{Result, UeciError};
use anyhow::anyhow;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Determines whether the specified resource (URI or filesystem path) is currently available.
pub async fn is_available(resource: &str) -> bool {
    if is_uri(resource) {
        network::uri_available(resource).await
    } else {
        Path::new(resource).exists()
    }
}

/// Returns the first available source from a list ordered cheapest-first.
///
/// # Errors
///
/// Returns `UeciError::NoSourceAvailable` when none of the sources can be reached.
#[instrument]
pub async fn select_cheapest<S: AsRef<str> + std::fmt::Debug>(sources: &[S]) -> Result<String> {
    for source in sources {
        let source = source.as_ref();
        if is_available(source).await {
            info!("Selected source: {}", source);
            return Ok(source.to_string());
        }
        debug!("Source not available: {}", source);
    }
    Err(anyhow!(UeciError::NoSourceAvailable {
        sources: sources.iter().map(|s| s.as_ref().to_string()).collect(),
    }))
}
