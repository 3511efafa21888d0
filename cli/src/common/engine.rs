//! # ueci Engine Utilities (`common::engine`)
//!
//! File: cli/src/common/engine.rs
//!
//! ## Overview
//!
//! Helpers for the Unreal Engine installation itself:
//!
//! - **`engine_root`**: the configured `[engine] root`, or whatever `ue4 root`
//!   prints for the engine the build tool is bound to.
//! - **`plugin_dir`**: `<engine>/Engine/Plugins/<prefix>/<plugin>`.
//! - **`install_plugin`**: extracts a prebuilt plugin archive (local or remote)
//!   into its plugin directory, replacing any previous copy.
//!
use crate::common::{archive, process};
use crate::core::config::EngineConfig;
use crate::core::error::{Result, UeciError};
use anyhow::anyhow;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Returns the root directory of the Unreal Engine installation.
///
/// # Errors
///
/// Fails if no override is configured and the build tool cannot report a root.
#[instrument(skip(config))]
pub fn engine_root(config: &EngineConfig, build_tool: &str) -> Result<PathBuf> {
    if let Some(root) = &config.root {
        debug!("Using configured engine root {}", root);
        return Ok(PathBuf::from(root));
    }
    let root = process::capture(build_tool, &["root"], None, false)?;
    if root.is_empty() {
        return Err(anyhow!(UeciError::Config(format!(
            "'{} root' did not report an engine location",
            build_tool
        ))));
    }
    Ok(PathBuf::from(root))
}

/// Returns the directory a prebuilt engine plugin should be installed into.
///
/// An empty `prefix` places the plugin directly under `Engine/Plugins`.
pub fn plugin_dir(engine_root: &Path, plugin: &str, prefix: &str) -> PathBuf {
    let mut dir = engine_root.join("Engine").join("Plugins");
    if !prefix.is_empty() {
        dir.push(prefix);
    }
    dir.join(plugin)
}

/// Extracts a prebuilt plugin archive into the engine's plugin tree.
///
/// # Returns
///
/// The directory the plugin was installed into.
#[instrument(skip(engine_root), fields(engine_root = %engine_root.display()))]
pub async fn install_plugin(
    engine_root: &Path,
    archive_path: &str,
    plugin: &str,
    prefix: &str,
) -> Result<PathBuf> {
    let dest = plugin_dir(engine_root, plugin, prefix);
    archive::extract(archive_path, &dest, true).await?;
    info!("Installed plugin {} into {:?}", plugin, dest);
    Ok(dest)
}
