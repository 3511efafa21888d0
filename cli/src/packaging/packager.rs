//! # Packager
//!
//! File: cli/src/packaging/packager.rs
//!
//! ## Overview
//!
//! Turns an Unreal project or plugin into a versioned zip archive in three
//! steps, each invoked separately by the caller:
//!
//! 1. **clean**: removes `<root>/dist` and any previous archive, and (unless
//!    preserving) asks the build tool to clean its own artifacts.
//! 2. **package**: runs the build tool's package command, stages extra files
//!    into `dist`, then strips debug symbols and/or manifests.
//! 3. **archive**: compresses the distribution into `<root>/<archive>.zip`.
//!
//! ## Architecture
//!
//! Projects and plugins differ only in their descriptor extension, so a single
//! `Packager` is parameterized by `DescriptorKind`. The build tool is a generic
//! parameter (`UeCli` in production, a recording double in tests).
//!
//! Everything derived from the project (descriptor, version, archive name) is
//! computed once in the constructor; the steps themselves only touch the
//! filesystem and the build tool.
//!
use super::build_tool::{BuildTool, UeCli};
use super::descriptor::{Descriptor, DescriptorKind};
use super::template::{expand_template, DEFAULT_TEMPLATE};
use super::version::VersionSource;
use crate::common::archive::{self, ArchiveFormat};
use crate::common::fs::copy::copy_path;
use crate::common::fs::io::remove_path;
use crate::common::fs::matching::remove_matching;
use crate::common::system;
use crate::core::config::PackagerConfig;
use crate::core::error::{Result, UeciError};
use anyhow::{anyhow, Context};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Name of the output directory under the project root.
pub const DIST_DIR: &str = "dist";

/// File patterns removed when stripping debug symbols.
pub const DEBUG_PATTERNS: [&str; 4] = ["*.pdb", "*.dsym", "*.debug", "*.sym"];

/// File patterns removed when stripping manifests.
pub const MANIFEST_PATTERNS: [&str; 1] = ["Manifest_*.txt"];

/// Packaging settings that are not derived from the project itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagerOptions {
    /// Archive filename template, without the `.zip` extension.
    pub archive_template: String,
    pub strip_debug: bool,
    pub strip_manifests: bool,
    /// Files and directories, relative to the root, copied into `dist` after packaging.
    pub stage: Vec<String>,
    /// Default for printing progress lines; each step can override it.
    pub verbose: bool,
}

impl Default for PackagerOptions {
    fn default() -> Self {
        Self {
            archive_template: DEFAULT_TEMPLATE.to_string(),
            strip_debug: false,
            strip_manifests: false,
            stage: Vec::new(),
            verbose: true,
        }
    }
}

impl From<&PackagerConfig> for PackagerOptions {
    fn from(config: &PackagerConfig) -> Self {
        Self {
            archive_template: config.archive_template.clone(),
            strip_debug: config.strip_debug,
            strip_manifests: config.strip_manifests,
            stage: config.stage.clone(),
            verbose: config.verbose,
        }
    }
}

/// Packages one project or plugin rooted at a directory.
#[derive(Debug)]
pub struct Packager<B: BuildTool = UeCli> {
    kind: DescriptorKind,
    root: PathBuf,
    descriptor: Descriptor,
    version: String,
    archive_name: String,
    options: PackagerOptions,
    tool: B,
}

impl<B: BuildTool> Packager<B> {
    /// Loads the descriptor, resolves the version and expands the archive name.
    ///
    /// # Arguments
    ///
    /// * `kind` - Whether `root` holds a `.uproject` or a `.uplugin`.
    /// * `root` - The project or plugin root directory.
    /// * `version` - A literal version or a resolver evaluated here, once.
    /// * `options` - Template, strip flags, stage list and verbosity.
    /// * `tool` - The build tool used by `clean` and `package`.
    ///
    /// # Errors
    ///
    /// * `UeciError::DescriptorNotFound` if `root` has no descriptor of this kind.
    /// * `UeciError::VersionUnavailable` if the resolver cannot produce a version.
    /// * `UeciError::Config` if a stage path is absolute.
    #[instrument(skip_all, fields(kind = %kind))]
    pub fn new(
        kind: DescriptorKind,
        root: impl AsRef<Path>,
        version: VersionSource,
        options: PackagerOptions,
        tool: B,
    ) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if let Some(bad) = options.stage.iter().find(|s| Path::new(s).is_absolute()) {
            return Err(anyhow!(UeciError::Config(format!(
                "Stage path '{}' must be relative to the {} root",
                bad, kind
            ))));
        }

        let descriptor = Descriptor::from_directory(&root, kind.extension())?;
        let version = version
            .resolve(&root, &descriptor)
            .with_context(|| format!("Failed to determine the version of {}", descriptor.name()))?;
        let archive_name = expand_template(
            &options.archive_template,
            descriptor.name(),
            &version,
            &system::identifier(),
        );
        info!(
            "Packaging {} '{}' version {} as {}.zip",
            kind,
            descriptor.name(),
            version,
            archive_name
        );

        Ok(Self {
            kind,
            root,
            descriptor,
            version,
            archive_name,
            options,
            tool,
        })
    }

    /// Shorthand for `new(DescriptorKind::Project, ..)`.
    pub fn project(
        root: impl AsRef<Path>,
        version: VersionSource,
        options: PackagerOptions,
        tool: B,
    ) -> Result<Self> {
        Self::new(DescriptorKind::Project, root, version, options, tool)
    }

    /// Shorthand for `new(DescriptorKind::Plugin, ..)`.
    pub fn plugin(
        root: impl AsRef<Path>,
        version: VersionSource,
        options: PackagerOptions,
        tool: B,
    ) -> Result<Self> {
        Self::new(DescriptorKind::Plugin, root, version, options, tool)
    }

    pub fn kind(&self) -> DescriptorKind {
        self.kind
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The expanded archive name, without extension.
    pub fn archive_name(&self) -> &str {
        &self.archive_name
    }

    pub fn dist_dir(&self) -> PathBuf {
        self.root.join(DIST_DIR)
    }

    /// Where `archive` writes the zip file.
    pub fn archive_path(&self) -> PathBuf {
        self.root.join(format!("{}.zip", self.archive_name))
    }

    /// Removes leftovers of a previous packaging run.
    ///
    /// `dist` and the archive are always removed. With `preserve == false` the
    /// build tool's clean command also runs, once, against the root.
    ///
    /// # Errors
    ///
    /// Fails if a removal fails or the build tool's clean command fails.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn clean(&self, preserve: bool, verbose: Option<bool>) -> Result<()> {
        self.progress(verbose, "Cleaning any existing build artifacts...");
        remove_path(&self.dist_dir())?;
        remove_path(&self.archive_path())?;
        if !preserve {
            self.tool
                .clean(&self.root)
                .context("Build tool failed to clean the build artifacts")?;
        }
        Ok(())
    }

    /// Packages into `dist`, stages extra paths, then strips unwanted files.
    ///
    /// # Arguments
    ///
    /// * `args` - Forwarded verbatim to the build tool's package command.
    /// * `verbose` - Overrides the constructor's verbosity for this step.
    ///
    /// # Returns
    ///
    /// Every path removed by stripping (empty when no strip flag is set).
    ///
    /// # Errors
    ///
    /// * The build tool's package command fails.
    /// * A stage path does not exist under the root.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn package(&self, args: &[String], verbose: Option<bool>) -> Result<Vec<PathBuf>> {
        self.progress(verbose, "Performing packaging...");
        self.tool
            .package(&self.root, args)
            .context("Build tool failed to package the distribution")?;

        let dist = self.dist_dir();
        for item in &self.options.stage {
            self.progress(verbose, &format!("Staging \"{}\"...", item));
            copy_path(&self.root.join(item), &dist.join(item))
                .with_context(|| format!("Failed to stage '{}'", item))?;
        }

        let filters = self.strip_filters();
        if filters.is_empty() {
            return Ok(Vec::new());
        }
        self.progress(verbose, &format!("Stripping {}...", self.strip_description()));
        let stripped = remove_matching(&dist, &filters)?;
        for path in &stripped {
            self.progress(verbose, &format!("Removed file \"{}\".", path.display()));
        }
        Ok(stripped)
    }

    /// Compresses the distribution into `<root>/<archive name>.zip`.
    ///
    /// # Errors
    ///
    /// Fails if `dist` does not exist or compression fails.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn archive(&self, verbose: Option<bool>) -> Result<PathBuf> {
        self.progress(verbose, "Compressing the packaged distribution...");
        let archive_root = self.archive_root()?;
        archive::compress(
            &self.root.join(&self.archive_name),
            ArchiveFormat::Zip,
            &archive_root,
        )
    }

    /// The directory whose contents become the archive's top level.
    ///
    /// A `dist` holding exactly one subdirectory and nothing else is unwrapped
    /// to that subdirectory; otherwise it is `dist` itself.
    pub fn archive_root(&self) -> Result<PathBuf> {
        let dist = self.dist_dir();
        let entries = std::fs::read_dir(&dist)
            .with_context(|| format!("Packaged distribution {:?} does not exist", dist))?
            .map(|e| e.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()
            .with_context(|| format!("Failed to list {:?}", dist))?;

        match entries.as_slice() {
            [only] if only.is_dir() => Ok(only.clone()),
            _ => Ok(dist),
        }
    }

    /// Patterns removed from `dist` according to the strip flags.
    pub fn strip_filters(&self) -> Vec<&'static str> {
        let mut filters = Vec::new();
        if self.options.strip_debug {
            filters.extend(DEBUG_PATTERNS);
        }
        if self.options.strip_manifests {
            filters.extend(MANIFEST_PATTERNS);
        }
        filters
    }

    /// Human-readable summary of what is stripped, e.g. `debug symbols and manifest files`.
    pub fn strip_description(&self) -> String {
        let mut items = Vec::new();
        if self.options.strip_debug {
            items.push("debug symbols");
        }
        if self.options.strip_manifests {
            items.push("manifest files");
        }
        items.join(" and ")
    }

    fn progress(&self, verbose: Option<bool>, message: &str) {
        info!("{}", message);
        if verbose.unwrap_or(self.options.verbose) {
            println!("{}", message);
        }
    }
}
