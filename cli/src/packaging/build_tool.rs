//! # External Build Tool
//!
//! File: cli/src/packaging/build_tool.rs
//!
//! ## Overview
//!
//! The packager never builds anything itself: it asks the engine's command-line
//! front end (`ue4` from ue4cli by default) to clean and to package, with the
//! project root as working directory. `BuildTool` is that seam, so the pipeline
//! can be driven by another front end or by a test double.
//!
use crate::common::process;
use crate::core::error::Result;
use std::path::Path;

/// The two build tool commands the packager needs.
pub trait BuildTool {
    /// Removes the tool's own build artifacts (`Binaries`, `Intermediate`, ...).
    fn clean(&self, root: &Path) -> Result<()>;

    /// Builds and packages the project into `<root>/dist`, forwarding `args`.
    fn package(&self, root: &Path, args: &[String]) -> Result<()>;
}

/// Drives a ue4cli-compatible program: `<program> clean` and `<program> package <args..>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UeCli {
    program: String,
}

impl UeCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for UeCli {
    fn default() -> Self {
        Self::new("ue4")
    }
}

impl BuildTool for UeCli {
    fn clean(&self, root: &Path) -> Result<()> {
        process::run(&self.program, &["clean"], Some(root))
    }

    fn package(&self, root: &Path, args: &[String]) -> Result<()> {
        let mut full_args = Vec::with_capacity(args.len() + 1);
        full_args.push("package".to_string());
        full_args.extend(args.iter().cloned());
        process::run(&self.program, &full_args, Some(root))
    }
}
