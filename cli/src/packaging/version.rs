//! # Version Resolver
//!
//! File: cli/src/packaging/version.rs
//!
//! ## Overview
//!
//! A packaged archive is named after a version string. That string is either
//! given literally or computed from the project by a `VersionResolver`, a
//! strategy receiving the project root and the parsed descriptor.
//!
//! Built-in resolvers:
//! - **`FromDescriptor`**: a descriptor field, `VersionName` by default.
//! - **`FromGitCommit`**: the date of the latest commit as `YYYYMMDD`.
//! - **`FromGitTag`**: the tag currently checked out.
//!
//! Any closure `Fn(&Path, &Descriptor) -> Result<String>` is a resolver too.
//!
//! `VersionSpec` is the textual form used in `.ueci.toml` and on the command
//! line: `descriptor`, `descriptor:<Field>`, `git-commit`, `git-tag` or
//! `literal:<value>`.
//!
//! ```rust
//! use crate::packaging::version::{FromDescriptor, VersionSource};
//! let source = VersionSource::resolver(FromDescriptor::default());
//! let custom = VersionSource::resolver(|_root: &std::path::Path, d: &Descriptor| -> Result<String> {
//!     Ok(format!("{}-nightly", d.name()))
//! });
//! ```
//!
use super::descriptor::Descriptor;
use crate::common::git;
use crate::core::error::{Result, UeciError};
use anyhow::anyhow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Descriptor field read by default.
pub const DEFAULT_VERSION_FIELD: &str = "VersionName";

/// Computes a version string for the project at `root`.
pub trait VersionResolver {
    /// Returns the version, or fails with `UeciError::VersionUnavailable`.
    fn resolve(&self, root: &Path, descriptor: &Descriptor) -> Result<String>;
}

impl<F> VersionResolver for F
where
    F: Fn(&Path, &Descriptor) -> Result<String>,
{
    fn resolve(&self, root: &Path, descriptor: &Descriptor) -> Result<String> {
        self(root, descriptor)
    }
}

/// Reads the version from a string field of the descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromDescriptor {
    pub field: String,
}

impl Default for FromDescriptor {
    fn default() -> Self {
        Self {
            field: DEFAULT_VERSION_FIELD.to_string(),
        }
    }
}

impl VersionResolver for FromDescriptor {
    fn resolve(&self, _root: &Path, descriptor: &Descriptor) -> Result<String> {
        descriptor
            .get_str(&self.field)
            .map(str::to_string)
            .ok_or_else(|| {
                anyhow!(UeciError::VersionUnavailable(format!(
                    "descriptor {:?} has no string field `{}`",
                    descriptor.path(),
                    self.field
                )))
            })
    }
}

/// Formats the date of the most recent commit as `YYYYMMDD`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FromGitCommit;

impl VersionResolver for FromGitCommit {
    fn resolve(&self, root: &Path, _descriptor: &Descriptor) -> Result<String> {
        git::commit_date(root)
            .map_err(|e| anyhow!(UeciError::VersionUnavailable(format!("{:#}", e))))
    }
}

/// Uses the tag checked out at `HEAD`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FromGitTag;

impl VersionResolver for FromGitTag {
    fn resolve(&self, root: &Path, _descriptor: &Descriptor) -> Result<String> {
        git::tag_name(root).ok_or_else(|| {
            anyhow!(UeciError::VersionUnavailable(format!(
                "no tag is checked out in {:?}",
                root
            )))
        })
    }
}

/// Where a packager's version string comes from.
pub enum VersionSource {
    /// A fixed version string.
    Literal(String),
    /// A strategy evaluated once when the packager is constructed.
    Resolver(Box<dyn VersionResolver>),
}

impl VersionSource {
    pub fn literal(version: impl Into<String>) -> Self {
        VersionSource::Literal(version.into())
    }

    pub fn resolver(resolver: impl VersionResolver + 'static) -> Self {
        VersionSource::Resolver(Box::new(resolver))
    }

    /// Produces the version string for the project at `root`.
    pub fn resolve(&self, root: &Path, descriptor: &Descriptor) -> Result<String> {
        let version = match self {
            VersionSource::Literal(v) => v.clone(),
            VersionSource::Resolver(r) => r.resolve(root, descriptor)?,
        };
        debug!("Resolved version '{}' for {}", version, descriptor.name());
        Ok(version)
    }
}

impl fmt::Debug for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSource::Literal(v) => f.debug_tuple("Literal").field(v).finish(),
            VersionSource::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

/// Textual version source, as written in configuration and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSpec {
    /// `descriptor` or `descriptor:<Field>`
    Descriptor(String),
    /// `git-commit`
    GitCommit,
    /// `git-tag`
    GitTag,
    /// `literal:<value>`
    Literal(String),
}

impl FromStr for VersionSpec {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once(':') {
            None if s == "descriptor" => Ok(VersionSpec::Descriptor(DEFAULT_VERSION_FIELD.to_string())),
            None if s == "git-commit" => Ok(VersionSpec::GitCommit),
            None if s == "git-tag" => Ok(VersionSpec::GitTag),
            Some(("descriptor", field)) if !field.is_empty() => {
                Ok(VersionSpec::Descriptor(field.to_string()))
            }
            Some(("literal", value)) if !value.is_empty() => Ok(VersionSpec::Literal(value.to_string())),
            _ => Err(format!(
                "Invalid version source '{}': expected descriptor, descriptor:<Field>, git-commit, git-tag or literal:<value>",
                s
            )),
        }
    }
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSpec::Descriptor(field) if field == DEFAULT_VERSION_FIELD => f.write_str("descriptor"),
            VersionSpec::Descriptor(field) => write!(f, "descriptor:{}", field),
            VersionSpec::GitCommit => f.write_str("git-commit"),
            VersionSpec::GitTag => f.write_str("git-tag"),
            VersionSpec::Literal(value) => write!(f, "literal:{}", value),
        }
    }
}

impl From<VersionSpec> for VersionSource {
    fn from(spec: VersionSpec) -> Self {
        match spec {
            VersionSpec::Descriptor(field) => VersionSource::resolver(FromDescriptor { field }),
            VersionSpec::GitCommit => VersionSource::resolver(FromGitCommit),
            VersionSpec::GitTag => VersionSource::resolver(FromGitTag),
            VersionSpec::Literal(value) => VersionSource::literal(value),
        }
    }
}
