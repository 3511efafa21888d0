//! # ueci Storage Command Group
//!
//! File: cli/src/commands/storage/mod.rs
//!
//! Uploads and downloads single objects in cloud storage. The endpoint and the
//! name of the token environment variable come from the `[storage]` table.
//!
//! ```bash
//! GOOGLE_OAUTH_ACCESS_TOKEN=$(gcloud auth print-access-token) \
//!     ueci storage upload ci-artifacts builds/Game-1.2.3-Linux.zip Game-1.2.3-Linux.zip
//! ```
//!
use crate::common::storage;
use crate::core::config;
use crate::core::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct StorageArgs {
    #[command(subcommand)]
    command: StorageCommand,
}

#[derive(Subcommand, Debug)]
enum StorageCommand {
    /// Upload a local file to `<bucket>/<key>`.
    Upload {
        bucket: String,
        key: String,
        file: PathBuf,
    },
    /// Download `<bucket>/<key>` to a local file.
    Download {
        bucket: String,
        key: String,
        file: PathBuf,
    },
}

/// Dispatches `ueci storage` subcommands.
pub async fn handle_storage(args: StorageArgs) -> Result<()> {
    let config = config::load_config()?;
    match args.command {
        StorageCommand::Upload { bucket, key, file } => {
            storage::upload_file(&config.storage, &bucket, &key, &file).await?;
            println!("Uploaded {} to gs://{}/{}", file.display(), bucket, key);
        }
        StorageCommand::Download { bucket, key, file } => {
            storage::download_file(&config.storage, &bucket, &key, &file).await?;
            println!("Downloaded gs://{}/{} to {}", bucket, key, file.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_args() {
        let args =
            StorageArgs::try_parse_from(["storage", "upload", "bucket", "a/b.zip", "b.zip"]).unwrap();
        match args.command {
            StorageCommand::Upload { bucket, key, file } => {
                assert_eq!(bucket, "bucket");
                assert_eq!(key, "a/b.zip");
                assert_eq!(file, PathBuf::from("b.zip"));
            }
            other => panic!("Unexpected command: {:?}", other),
        }
        assert!(StorageArgs::try_parse_from(["storage", "download", "bucket"]).is_err());
    }
}
