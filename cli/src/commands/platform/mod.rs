//! # ueci Platform Command
//!
//! File: cli/src/commands/platform/mod.rs
//!
//! Prints the host platform label used in archive names (`Linux`, `Mac`, `Windows`).
//!
use crate::common::system;
use crate::core::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Print the platform label used in archive names")]
pub struct PlatformArgs {
    /// Print the raw identifier (e.g. `Darwin`) instead of the normalized label.
    #[arg(long)]
    raw: bool,
}

pub async fn handle_platform(args: PlatformArgs) -> Result<()> {
    if args.raw {
        println!("{}", system::raw_identifier());
    } else {
        println!("{}", system::identifier());
    }
    Ok(())
}
