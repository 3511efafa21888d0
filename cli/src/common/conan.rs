//! # ueci Conan Utilities (`common::conan`)
//!
//! File: cli/src/common/conan.rs
//!
//! ## Overview
//!
//! `copy_package` copies the contents of a Conan package (as built for the
//! `ue4` profile used by conan-ue4cli) out of the local package cache.
//!
//! Conan has no direct "where is this package" query, so the package is consumed
//! from a throwaway `conanfile.txt` with the `json` generator. `conan install`
//! then writes `conanbuildinfo.json`, whose `dependencies[].rootpath` is the
//! package folder.
//!
use crate::common::fs::copy::copy_path;
use crate::common::fs::io::{read_file_to_string, remove_path, write_string_to_file};
use crate::common::process;
use crate::core::error::{Result, UeciError};
use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Conan profile packages are installed for.
pub const DEFAULT_PROFILE: &str = "ue4";

#[derive(Debug, Deserialize)]
struct BuildInfo {
    #[serde(default)]
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
    rootpath: PathBuf,
}

/// Renders a `conanfile.txt` that requires `package` and uses the json generator.
pub fn conanfile_contents(package: &str) -> String {
    format!("\n[requires]\n{}\n\n[generators]\njson\n", package)
}

/// Finds the package root of `package` (e.g. `libcxx/ue4@adamrehn/profile`) in
/// the contents of a `conanbuildinfo.json`.
pub fn find_rootpath(buildinfo_json: &str, package: &str) -> Result<PathBuf> {
    let info: BuildInfo =
        serde_json::from_str(buildinfo_json).context("Failed to parse conanbuildinfo.json")?;
    let name = package.split('/').next().unwrap_or(package);
    info.dependencies
        .into_iter()
        .find(|dep| dep.name == name)
        .map(|dep| dep.rootpath)
        .ok_or_else(|| {
            anyhow!(UeciError::FileSystem(format!(
                "Package '{}' is missing from conanbuildinfo.json",
                name
            )))
        })
}

/// Copies the contents of a Conan package to `destination`, replacing it if it exists.
///
/// # Errors
///
/// * `conan install` fails (its stderr is shown as it runs).
/// * The generated build info does not list the package.
/// * The copy fails.
#[instrument(fields(destination = %destination.display()))]
pub fn copy_package(package: &str, destination: &Path, profile: &str) -> Result<PathBuf> {
    let temp = tempfile::tempdir().context("Failed to create temporary directory")?;
    write_string_to_file(&temp.path().join("conanfile.txt"), &conanfile_contents(package))?;

    let stdout = process::capture(
        "conan",
        &["install", ".", "--profile", profile],
        Some(temp.path()),
        false,
    )?;
    debug!("conan install output:\n{}", stdout);

    let buildinfo = read_file_to_string(&temp.path().join("conanbuildinfo.json"))?;
    let source = find_rootpath(&buildinfo, package)?;

    remove_path(destination)?;
    copy_path(&source, destination)?;
    info!("Copied package {} from {:?} to {:?}", package, source, destination);
    Ok(source)
}
