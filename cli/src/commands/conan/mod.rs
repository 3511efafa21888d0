//! # ueci Conan Command Group
//!
//! File: cli/src/commands/conan/mod.rs
//!
//! `ueci conan copy-package` installs a Conan package with the given profile
//! and copies its package folder to a destination directory.
//!
//! ```bash
//! ueci conan copy-package libcxx/ue4@adamrehn/profile ThirdParty/libcxx
//! ```
//!
use crate::common::conan;
use crate::core::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct ConanArgs {
    #[command(subcommand)]
    command: ConanCommand,
}

#[derive(Subcommand, Debug)]
enum ConanCommand {
    /// Copy a Conan package's contents to a directory.
    CopyPackage {
        /// Package reference, e.g. `zlib/ue4@adamrehn/profile`.
        package: String,
        destination: PathBuf,
        #[arg(long, default_value = conan::DEFAULT_PROFILE)]
        profile: String,
    },
}

/// Dispatches `ueci conan` subcommands.
pub async fn handle_conan(args: ConanArgs) -> Result<()> {
    match args.command {
        ConanCommand::CopyPackage {
            package,
            destination,
            profile,
        } => {
            let source = conan::copy_package(&package, &destination, &profile)?;
            println!("{}", source.display());
        }
    }
    Ok(())
}
