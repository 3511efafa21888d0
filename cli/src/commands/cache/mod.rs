//! # ueci Cache Command Group
//!
//! File: cli/src/commands/cache/mod.rs
//!
//! `ueci cache select` prints the first available source among those given,
//! ordered cheapest-first. `ueci cache check` reports whether one source is
//! available, through the exit status.
//!
//! ```bash
//! ueci cache select /mnt/cache/ThirdParty.zip https://mirror.lan/ThirdParty.zip https://cdn.example.com/ThirdParty.zip
//! ```
//!
use crate::common::cache;
use crate::core::error::{Result, UeciError};
use anyhow::anyhow;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    command: CacheCommand,
}

#[derive(Subcommand, Debug)]
enum CacheCommand {
    /// Print the first available source (local path or URL).
    Select {
        /// Candidate sources, cheapest first.
        #[arg(required = true, num_args = 1..)]
        sources: Vec<String>,
    },
    /// Succeed if the resource is available, fail otherwise.
    Check { resource: String },
}

/// Dispatches `ueci cache` subcommands.
pub async fn handle_cache(args: CacheArgs) -> Result<()> {
    match args.command {
        CacheCommand::Select { sources } => {
            let selected = cache::select_cheapest(&sources).await?;
            println!("{}", selected);
        }
        CacheCommand::Check { resource } => {
            if !cache::is_available(&resource).await {
                return Err(anyhow!(UeciError::NoSourceAvailable {
                    sources: vec![resource],
                }));
            }
            println!("{}", resource);
        }
    }
    Ok(())
}
