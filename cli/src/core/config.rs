//! # ueci Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates ueci configuration. Every setting has
//! a default, so a CI job can run without any configuration file at all; the
//! files exist to pin per-project packaging settings (build tool, archive name
//! template, stripping, staged files) and per-machine storage/engine settings.
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.ueci.toml` in the current directory or its ancestors
//!    (the search stops at the first directory containing `.git`)
//! 2. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/ueci/config.toml` on Linux)
//! 3. Default values defined in the code
//!
//! Command-line flags override whatever is loaded here.
//!
//! ## Example
//!
//! ```toml
//! [packager]
//! build_tool = "ue4"
//! archive_template = "{name}-{version}-{platform}"
//! version = "git-commit"
//! strip_debug = true
//! stage = ["Docs/README.md"]
//!
//! [storage]
//! token_env = "GCS_TOKEN"
//!
//! [engine]
//! root = "~/UnrealEngine"
//! ```
//!
use crate::core::error::{Result, UeciError};
use crate::packaging::version::VersionSpec;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub packager: PackagerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Settings for `ueci package`.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct PackagerConfig {
    /// Program invoked as `<build_tool> clean` and `<build_tool> package ...`.
    #[serde(default = "default_build_tool")]
    pub build_tool: String,
    /// Archive filename template. Supports `{name}`, `{version}` and `{platform}`.
    #[serde(default = "default_archive_template")]
    pub archive_template: String,
    /// Version source, in `VersionSpec` string form.
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub strip_debug: bool,
    #[serde(default)]
    pub strip_manifests: bool,
    /// Extra files and directories (relative to the project root) copied into the distribution.
    #[serde(default)]
    pub stage: Vec<String>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl Default for PackagerConfig {
    fn default() -> Self {
        Self {
            build_tool: default_build_tool(),
            archive_template: default_archive_template(),
            version: default_version(),
            strip_debug: false,
            strip_manifests: false,
            stage: Vec::new(),
            verbose: default_verbose(),
        }
    }
}

/// Settings for `ueci storage`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Base URL of the object storage JSON API.
    #[serde(default = "default_storage_endpoint")]
    pub endpoint: String,
    /// Name of the environment variable holding the OAuth bearer token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: default_storage_endpoint(),
            token_env: default_token_env(),
        }
    }
}

/// Settings for `ueci engine`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Engine installation root (can use ~). When unset, `ue4 root` is queried.
    pub root: Option<String>,
}

pub(crate) fn default_build_tool() -> String {
    "ue4".to_string()
}
pub(crate) fn default_archive_template() -> String {
    crate::packaging::template::DEFAULT_TEMPLATE.to_string()
}
fn default_version() -> String {
    "descriptor".to_string()
}
fn default_verbose() -> bool {
    true
}
fn default_storage_endpoint() -> String {
    "https://storage.googleapis.com".to_string()
}
fn default_token_env() -> String {
    "GOOGLE_OAUTH_ACCESS_TOKEN".to_string()
}

const PROJECT_CONFIG_FILENAME: &str = ".ueci.toml";

/// Loads the merged configuration for the current working directory.
pub fn load_config() -> Result<Config> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    load_config_from(&current_dir)
}

/// Loads the merged configuration, searching for a project file from `start_dir` upwards.
pub fn load_config_from(start_dir: &Path) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = match find_project_config_path(start_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            Some(load_config_from_path(&path)?)
        }
        None => {
            debug!("No project configuration file (.ueci.toml) found.");
            None
        }
    };
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "ueci", "ueci") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn find_project_config_path(start_dir: &Path) -> Option<PathBuf> {
    let mut path = start_dir;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = PackagerConfig::default();
    let mut merged = Config::default();

    merged.packager.build_tool = if project_cfg.packager.build_tool != defaults.build_tool {
        project_cfg.packager.build_tool
    } else {
        user.packager.build_tool
    };
    merged.packager.archive_template =
        if project_cfg.packager.archive_template != defaults.archive_template {
            project_cfg.packager.archive_template
        } else {
            user.packager.archive_template
        };
    merged.packager.version = if project_cfg.packager.version != defaults.version {
        project_cfg.packager.version
    } else {
        user.packager.version
    };
    merged.packager.strip_debug = project_cfg.packager.strip_debug || user.packager.strip_debug;
    merged.packager.strip_manifests =
        project_cfg.packager.strip_manifests || user.packager.strip_manifests;
    merged.packager.stage = if !project_cfg.packager.stage.is_empty() {
        project_cfg.packager.stage
    } else {
        user.packager.stage
    };
    merged.packager.verbose = project_cfg.packager.verbose && user.packager.verbose;

    merged.storage = if project_cfg.storage != StorageConfig::default() {
        project_cfg.storage
    } else {
        user.storage
    };
    merged.engine.root = project_cfg.engine.root.or(user.engine.root);
    merged
}

fn expand_config_paths(config: &mut Config) {
    if let Some(root) = config.engine.root.as_mut() {
        *root = shellexpand::tilde(root.as_str()).into_owned();
        debug!("Expanded engine root: {}", root);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    if config.packager.build_tool.trim().is_empty() {
        return Err(anyhow!(UeciError::Config(
            "packager.build_tool cannot be empty.".to_string()
        )));
    }
    if config.packager.archive_template.trim().is_empty() {
        return Err(anyhow!(UeciError::Config(
            "packager.archive_template cannot be empty.".to_string()
        )));
    }
    config
        .packager
        .version
        .parse::<VersionSpec>()
        .map_err(|e| anyhow!(UeciError::Config(e.to_string())))?;
    for item in &config.packager.stage {
        if Path::new(item).is_absolute() {
            return Err(anyhow!(UeciError::Config(format!(
                "Staged path '{}' must be relative to the project root.",
                item
            ))));
        }
    }
    Ok(())
}
