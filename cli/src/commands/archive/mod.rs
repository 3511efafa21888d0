//! # ueci Archive Command Group
//!
//! File: cli/src/commands/archive/mod.rs
//!
//! ## Overview
//!
//! `ueci archive compress` packs a directory into a zip, tar or gzipped tar;
//! `ueci archive extract` unpacks a local or remote archive.
//!
//! ## Usage
//!
//! ```bash
//! ueci archive compress dist/LinuxNoEditor --output Game-1.0-Linux --format zip
//! ueci archive extract https://ci.example.com/deps/ThirdParty.tar.gz ThirdParty --remove-existing
//! ```
//!
use crate::common::archive::{self, ArchiveFormat};
use crate::core::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
pub struct ArchiveArgs {
    #[command(subcommand)]
    command: ArchiveCommand,
}

#[derive(Subcommand, Debug)]
enum ArchiveCommand {
    /// Compress a directory; the format's extension is appended to the output name.
    Compress {
        /// Directory whose contents become the archive's top level.
        root_dir: PathBuf,
        /// Output path without extension.
        #[arg(short, long)]
        output: PathBuf,
        /// One of zip, tar, gztar.
        #[arg(short, long, default_value = "zip", value_parser = parse_format)]
        format: ArchiveFormat,
    },
    /// Extract an archive (path or URL) into a directory.
    Extract {
        /// Archive path or URL; the format is detected from the extension.
        archive: String,
        /// Destination directory.
        destination: PathBuf,
        /// Delete the destination before extracting.
        #[arg(long)]
        remove_existing: bool,
    },
}

fn parse_format(value: &str) -> std::result::Result<ArchiveFormat, String> {
    value.parse::<ArchiveFormat>().map_err(|e| e.to_string())
}

/// Dispatches `ueci archive` subcommands.
pub async fn handle_archive(args: ArchiveArgs) -> Result<()> {
    match args.command {
        ArchiveCommand::Compress {
            root_dir,
            output,
            format,
        } => {
            let path = archive::compress(&output, format, &root_dir)?;
            println!("{}", path.display());
        }
        ArchiveCommand::Extract {
            archive,
            destination,
            remove_existing,
        } => {
            archive::extract(&archive, &destination, remove_existing).await?;
            info!("Extracted {} into {:?}", archive, destination);
        }
    }
    Ok(())
}
