//! # Descriptor Reader
//!
//! File: cli/src/packaging/descriptor.rs
//!
//! ## Overview
//!
//! Unreal projects and plugins are identified by a JSON descriptor sitting in
//! their root directory: `Game.uproject` or `MyPlugin.uplugin`. The descriptor's
//! file name (minus extension) is the project or plugin name, and its fields
//! carry metadata such as `VersionName`.
//!
//! `Descriptor::from_directory` locates that file, parses it, and injects a
//! `Name` key holding the file's base name, so every consumer can look the name
//! up like any other field.
//!
//! When several files match, the first in sorted order wins and a warning is
//! logged.
//!
use crate::core::error::{Result, UeciError};
use anyhow::{anyhow, Context};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key injected into every descriptor with the descriptor's base name.
pub const NAME_KEY: &str = "Name";

/// The kinds of descriptor a packager can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
    /// A game or application project (`.uproject`).
    Project,
    /// An engine or project plugin (`.uplugin`).
    Plugin,
}

impl DescriptorKind {
    /// The descriptor file extension, including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            DescriptorKind::Project => ".uproject",
            DescriptorKind::Plugin => ".uplugin",
        }
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptorKind::Project => f.write_str("project"),
            DescriptorKind::Plugin => f.write_str("plugin"),
        }
    }
}

/// Parsed descriptor data, augmented with `Name`. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    path: PathBuf,
    data: Map<String, Value>,
}

impl Descriptor {
    /// Finds and parses the descriptor with `extension` directly under `directory`.
    ///
    /// # Arguments
    ///
    /// * `directory` - The project or plugin root.
    /// * `extension` - Extension including the dot, e.g. `.uproject`.
    ///
    /// # Errors
    ///
    /// * `UeciError::DescriptorNotFound` when no file matches.
    /// * A parse error when the file is not a JSON object.
    pub fn from_directory(directory: &Path, extension: &str) -> Result<Self> {
        let dir_str = directory.to_str().ok_or_else(|| {
            anyhow!(UeciError::FileSystem(format!(
                "Directory path is not valid UTF-8: {:?}",
                directory
            )))
        })?;
        let pattern = format!(
            "{}/*{}",
            glob::Pattern::escape(dir_str.trim_end_matches(['/', '\\'])),
            glob::Pattern::escape(extension)
        );
        let mut matches: Vec<PathBuf> = glob::glob(&pattern)
            .with_context(|| format!("Invalid descriptor search pattern '{}'", pattern))?
            .filter_map(|entry| entry.ok())
            .filter(|p| p.is_file())
            .collect();
        matches.sort();

        let Some(first) = matches.first() else {
            return Err(anyhow!(UeciError::DescriptorNotFound {
                extension: extension.to_string(),
                directory: directory.display().to_string(),
            }));
        };
        if matches.len() > 1 {
            warn!(
                "Found {} `{}` descriptors in {:?}; using {:?}",
                matches.len(),
                extension,
                directory,
                first
            );
        }
        Self::from_file(first)
    }

    /// Parses the descriptor at `path` and injects its `Name`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read descriptor {:?}", path))?;
        let mut data: Map<String, Value> =
            serde_json::from_str(raw.trim_start_matches('\u{feff}'))
                .with_context(|| format!("Failed to parse descriptor {:?} as a JSON object", path))?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!("Loaded descriptor {:?} (name: {})", path, name);
        data.insert(NAME_KEY.to_string(), Value::String(name));
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    /// The descriptor's base name (file name without extension).
    pub fn name(&self) -> &str {
        self.get_str(NAME_KEY).unwrap_or_default()
    }

    /// Path of the descriptor file that was loaded.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the raw JSON value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Returns `key` if it holds a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// All fields, including `Name`.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_name_is_file_stem() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("ShooterGame.uproject"),
            r#"{"FileVersion": 3, "VersionName": "1.2.3"}"#,
        )?;
        fs::write(dir.path().join("README.md"), "not a descriptor")?;

        let descriptor = Descriptor::from_directory(dir.path(), ".uproject")?;
        assert_eq!(descriptor.name(), "ShooterGame");
        assert_eq!(descriptor.get_str("VersionName"), Some("1.2.3"));
        assert_eq!(descriptor.get("FileVersion"), Some(&Value::from(3)));
        assert_eq!(descriptor.get_str("FileVersion"), None);
        assert_eq!(descriptor.as_map().len(), 3);
        assert_eq!(descriptor.path(), dir.path().join("ShooterGame.uproject"));
        Ok(())
    }

    #[test]
    fn test_name_overrides_existing_field() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("Plug.uplugin"), r#"{"Name": "Other"}"#)?;
        let descriptor = Descriptor::from_directory(dir.path(), DescriptorKind::Plugin.extension())?;
        assert_eq!(descriptor.name(), "Plug");
        Ok(())
    }

    #[test]
    fn test_not_found() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Plug.uplugin"), "{}").unwrap();
        let err = Descriptor::from_directory(dir.path(), ".uproject").unwrap_err();
        match err.downcast_ref::<UeciError>() {
            Some(UeciError::DescriptorNotFound { extension, .. }) => {
                assert_eq!(extension, ".uproject")
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_multiple_matches_takes_first_sorted() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("Zeta.uproject"), "{}")?;
        fs::write(dir.path().join("Alpha.uproject"), "{}")?;
        let descriptor = Descriptor::from_directory(dir.path(), ".uproject")?;
        assert_eq!(descriptor.name(), "Alpha");
        Ok(())
    }

    #[test]
    fn test_directory_with_glob_characters() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().join("Game [CI]");
        fs::create_dir(&root)?;
        fs::write(root.join("Game.uproject"), "{}")?;
        assert_eq!(Descriptor::from_directory(&root, ".uproject")?.name(), "Game");
        Ok(())
    }

    #[test]
    fn test_bom_and_invalid_json() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("Bom.uproject"), "\u{feff}{\"VersionName\":\"2.0\"}")?;
        assert_eq!(
            Descriptor::from_directory(dir.path(), ".uproject")?.get_str("VersionName"),
            Some("2.0")
        );

        let other = tempdir()?;
        fs::write(other.path().join("List.uproject"), "[1, 2]")?;
        assert!(Descriptor::from_directory(other.path(), ".uproject").is_err());
        Ok(())
    }

    #[test]
    fn test_kind_extensions() {
        assert_eq!(DescriptorKind::Project.extension(), ".uproject");
        assert_eq!(DescriptorKind::Plugin.extension(), ".uplugin");
        assert_eq!(DescriptorKind::Plugin.to_string(), "plugin");
    }
}
