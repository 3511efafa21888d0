//! # ueci Container Glob
//!
//! File: cli/src/commands/container/glob.rs
//!
//! Prints the paths inside a running container that match a glob pattern, one
//! per line. Requires a Python interpreter in the image.
//!
use crate::common::docker;
use crate::core::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct GlobArgs {
    container: String,
    /// Pattern evaluated inside the container, e.g. `/tmp/workspace/**/*.log`.
    pattern: String,
}

pub async fn handle_glob(args: GlobArgs) -> Result<()> {
    for path in docker::glob(&args.container, &args.pattern).await? {
        println!("{}", path);
    }
    Ok(())
}
