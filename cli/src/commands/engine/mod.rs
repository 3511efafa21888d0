//! # ueci Engine Command Group
//!
//! File: cli/src/commands/engine/mod.rs
//!
//! ## Overview
//!
//! - `ueci engine root` prints the engine installation directory.
//! - `ueci engine install-plugin` extracts a prebuilt plugin archive (path or
//!   URL) into `Engine/Plugins/<prefix>/<name>`, replacing any previous copy.
//!
//! The engine root comes from `[engine] root` when set, otherwise from the
//! configured build tool (`ue4 root`).
//!
//! ## Usage
//!
//! ```bash
//! ueci engine install-plugin https://ci.example.com/plugins/MeshLoader-Linux.zip MeshLoader --prefix Marketplace
//! ```
//!
use crate::common::engine;
use crate::core::config;
use crate::core::error::Result;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct EngineArgs {
    #[command(subcommand)]
    command: EngineCommand,
}

#[derive(Subcommand, Debug)]
enum EngineCommand {
    /// Print the engine root directory.
    Root,
    /// Install a prebuilt plugin archive into the engine.
    InstallPlugin {
        /// Archive path or URL.
        archive: String,
        /// Plugin directory name.
        name: String,
        /// Subdirectory of Engine/Plugins to install under.
        #[arg(long, default_value = "")]
        prefix: String,
    },
}

/// Dispatches `ueci engine` subcommands.
pub async fn handle_engine(args: EngineArgs) -> Result<()> {
    let config = config::load_config()?;
    let root = engine::engine_root(&config.engine, &config.packager.build_tool)?;
    match args.command {
        EngineCommand::Root => println!("{}", root.display()),
        EngineCommand::InstallPlugin {
            archive,
            name,
            prefix,
        } => {
            let dest = engine::install_plugin(&root, &archive, &name, &prefix).await?;
            println!("{}", dest.display());
        }
    }
    Ok(())
}
