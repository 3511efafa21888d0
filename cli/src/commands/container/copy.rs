//! # ueci Container Copy
//!
//! File: cli/src/commands/container/copy.rs
//!
//! `cp-in` and `cp-out` move files or directory trees between the host and a
//! running container.
//!
use crate::common::docker;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct CopyInArgs {
    container: String,
    /// Host file or directory.
    host_path: PathBuf,
    /// Destination path inside the container.
    container_path: String,
}

#[derive(Parser, Debug)]
pub struct CopyOutArgs {
    container: String,
    /// File or directory inside the container.
    container_path: String,
    /// Destination path on the host.
    host_path: PathBuf,
}

pub async fn handle_copy_in(args: CopyInArgs) -> Result<()> {
    docker::copy_from_host(&args.container, &args.host_path, &args.container_path).await
}

pub async fn handle_copy_out(args: CopyOutArgs) -> Result<()> {
    docker::copy_to_host(&args.container, &args.container_path, &args.host_path).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_args_order() {
        let cp_in = CopyInArgs::try_parse_from(["cp-in", "abc", "Source", "/tmp/workspace/Source"])
            .unwrap();
        assert_eq!(cp_in.host_path, PathBuf::from("Source"));
        assert_eq!(cp_in.container_path, "/tmp/workspace/Source");

        let cp_out = CopyOutArgs::try_parse_from(["cp-out", "abc", "/tmp/workspace/dist", "dist"])
            .unwrap();
        assert_eq!(cp_out.container_path, "/tmp/workspace/dist");
        assert_eq!(cp_out.host_path, PathBuf::from("dist"));
    }
}
