//! # ueci Package Command
//!
//! File: cli/src/commands/package/mod.rs
//!
//! ## Overview
//!
//! Implements `ueci package`, which runs the full packaging pipeline for the
//! project (or plugin) at `--root`: clean, package, archive. The archive path
//! is printed on stdout when the pipeline finishes.
//!
//! ## Architecture
//!
//! 1. Load configuration, searching for `.ueci.toml` from the root upwards.
//! 2. Merge the `[packager]` table with command-line flags (flags win).
//! 3. Construct a `Packager` driving the configured build tool.
//! 4. Run the steps not disabled by `--skip-*` flags.
//!
//! ## Usage
//!
//! ```bash
//! # Package the project in the current directory, versioned from the descriptor
//! ueci package
//!
//! # Package a plugin, versioned by the latest commit date, stripping symbols
//! ueci package --root Plugins/Widgets --plugin --version-from git-commit --strip-debug
//!
//! # Keep Binaries/Intermediate and forward arguments to `ue4 package`
//! ueci package --preserve -- -clientconfig=Shipping
//! ```
//!
use crate::core::config::{load_config_from, PackagerConfig};
use crate::core::error::{Result, UeciError};
use crate::packaging::{DescriptorKind, Packager, PackagerOptions, UeCli, VersionSpec};
use anyhow::{anyhow, Context};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(about = "Clean, package and archive an Unreal project or plugin")]
pub struct PackageArgs {
    /// Root directory of the project or plugin.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Package a plugin (`.uplugin`) instead of a project (`.uproject`).
    #[arg(long)]
    plugin: bool,

    /// Version source: descriptor, descriptor:<Field>, git-commit, git-tag or literal:<value>.
    #[arg(long = "version-from", value_name = "SOURCE")]
    version_from: Option<VersionSpec>,

    /// Archive filename template using {name}, {version} and {platform}.
    #[arg(long, value_name = "TEMPLATE")]
    archive_template: Option<String>,

    /// Remove debug symbols (*.pdb, *.dsym, *.debug, *.sym) from the distribution.
    #[arg(long)]
    strip_debug: bool,

    /// Remove Manifest_*.txt files from the distribution.
    #[arg(long)]
    strip_manifests: bool,

    /// Extra file or directory (relative to the root) to copy into the distribution. Repeatable.
    #[arg(long = "stage", value_name = "PATH")]
    stage: Vec<String>,

    /// Do not remove the previous distribution and archive.
    #[arg(long)]
    skip_clean: bool,

    /// Keep the build tool's own artifacts when cleaning.
    #[arg(long)]
    preserve: bool,

    /// Stop after packaging, without creating the zip archive.
    #[arg(long)]
    skip_archive: bool,

    /// Suppress progress lines on stdout.
    #[arg(short, long)]
    quiet: bool,

    /// Arguments forwarded to the build tool's package command.
    #[arg(last = true, value_name = "ARGS")]
    args: Vec<String>,
}

impl PackageArgs {
    fn kind(&self) -> DescriptorKind {
        if self.plugin {
            DescriptorKind::Plugin
        } else {
            DescriptorKind::Project
        }
    }
}

/// Combines the `[packager]` configuration with command-line overrides.
fn resolve_settings(
    args: &PackageArgs,
    config: &PackagerConfig,
) -> Result<(PackagerOptions, VersionSpec)> {
    let mut options = PackagerOptions::from(config);
    if let Some(template) = &args.archive_template {
        options.archive_template = template.clone();
    }
    options.strip_debug |= args.strip_debug;
    options.strip_manifests |= args.strip_manifests;
    if !args.stage.is_empty() {
        options.stage = args.stage.clone();
    }
    if args.quiet {
        options.verbose = false;
    }

    let version = match &args.version_from {
        Some(spec) => spec.clone(),
        None => config
            .version
            .parse::<VersionSpec>()
            .map_err(|e| anyhow!(UeciError::Config(e)))?,
    };
    Ok((options, version))
}

/// Handles `ueci package`.
///
/// # Errors
///
/// Any failure of the pipeline: missing descriptor, unavailable version,
/// build tool failure, missing stage path or compression failure.
pub async fn handle_package(args: PackageArgs) -> Result<()> {
    let root = std::fs::canonicalize(&args.root)
        .with_context(|| format!("Project root {:?} does not exist", args.root))?;
    let config = load_config_from(&root)?;
    let (options, version) = resolve_settings(&args, &config.packager)?;
    debug!("Packaging with {:?}, version from {}", options, version);

    let tool = UeCli::new(config.packager.build_tool.clone());
    debug!("Using build tool '{}'", tool.program());
    let packager = match args.kind() {
        DescriptorKind::Project => Packager::project(&root, version.into(), options, tool)?,
        DescriptorKind::Plugin => Packager::plugin(&root, version.into(), options, tool)?,
    };
    debug!(
        "Loaded {} descriptor {:?} ({} fields, version {}) under {:?}",
        packager.kind(),
        packager.descriptor().path(),
        packager.descriptor().as_map().len(),
        packager.version(),
        packager.root()
    );

    if args.skip_clean {
        info!("Skipping clean step");
    } else {
        packager.clean(args.preserve, None)?;
    }
    let stripped = packager.package(&args.args, None)?;
    debug!("Stripped {} paths", stripped.len());

    if args.skip_archive {
        info!("Skipping archive step; distribution left in {:?}", packager.dist_dir());
        return Ok(());
    }
    let archive = packager.archive(None)?;
    println!("{}", archive.display());
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_args_defaults() {
        let args = PackageArgs::try_parse_from(["package"]).unwrap();
        assert_eq!(args.root, PathBuf::from("."));
        assert_eq!(args.kind(), DescriptorKind::Project);
        assert!(args.version_from.is_none());
        assert!(args.args.is_empty());
        assert!(!args.skip_clean && !args.preserve && !args.skip_archive && !args.quiet);
    }

    #[test]
    fn test_package_args_full() {
        let args = PackageArgs::try_parse_from([
            "package",
            "--root",
            "Plugins/Widgets",
            "--plugin",
            "--version-from",
            "git-tag",
            "--stage",
            "Docs",
            "--stage",
            "LICENSE",
            "--strip-debug",
            "--preserve",
            "-q",
            "--",
            "-clientconfig=Shipping",
            "-nocompile",
        ])
        .unwrap();
        assert_eq!(args.kind(), DescriptorKind::Plugin);
        assert_eq!(args.version_from, Some(VersionSpec::GitTag));
        assert_eq!(args.stage, vec!["Docs", "LICENSE"]);
        assert_eq!(args.args, vec!["-clientconfig=Shipping", "-nocompile"]);
        assert!(args.strip_debug && args.preserve && args.quiet);
    }

    #[test]
    fn test_invalid_version_source_rejected() {
        let result = PackageArgs::try_parse_from(["package", "--version-from", "svn"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_config() -> Result<()> {
        let config = PackagerConfig {
            archive_template: "{name}".to_string(),
            strip_manifests: true,
            stage: vec!["FromConfig".to_string()],
            version: "git-commit".to_string(),
            ..PackagerConfig::default()
        };

        let plain = PackageArgs::try_parse_from(["package"]).unwrap();
        let (options, version) = resolve_settings(&plain, &config)?;
        assert_eq!(options.archive_template, "{name}");
        assert_eq!(options.stage, vec!["FromConfig"]);
        assert!(options.strip_manifests && !options.strip_debug && options.verbose);
        assert_eq!(version, VersionSpec::GitCommit);

        let flagged = PackageArgs::try_parse_from([
            "package",
            "--archive-template",
            "{name}-{version}",
            "--stage",
            "FromFlag",
            "--strip-debug",
            "--version-from",
            "literal:7",
            "--quiet",
        ])
        .unwrap();
        let (options, version) = resolve_settings(&flagged, &config)?;
        assert_eq!(options.archive_template, "{name}-{version}");
        assert_eq!(options.stage, vec!["FromFlag"]);
        assert!(options.strip_manifests && options.strip_debug && !options.verbose);
        assert_eq!(version, VersionSpec::Literal("7".to_string()));
        Ok(())
    }

    #[test]
    fn test_invalid_configured_version_is_config_error() {
        let config = PackagerConfig {
            version: "nope".to_string(),
            ..PackagerConfig::default()
        };
        let args = PackageArgs::try_parse_from(["package"]).unwrap();
        let err = resolve_settings(&args, &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<UeciError>(),
            Some(UeciError::Config(_))
        ));
    }
}
