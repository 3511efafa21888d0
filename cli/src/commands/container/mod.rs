//! # ueci Container Command Group
//!
//! File: cli/src/commands/container/mod.rs
//!
//! ## Overview
//!
//! Wraps the container helpers in `common::docker` for use from CI scripts:
//! building images, starting detached containers to run commands in, copying
//! files in and out, and globbing paths inside a container.
//!
//! ## Architecture
//!
//! - `ContainerArgs` / `ContainerCommand`: clap definitions for the group.
//! - `handle_container`: routes each subcommand to its module's handler.
//!
//! Each subcommand lives in its own file (`build.rs`, `exec.rs`, ...).
//!
//! ## Usage
//!
//! ```bash
//! # Build an image from the current directory
//! ueci container build --tag ue4-ci:latest
//!
//! # Run commands in a throwaway container, copying the workspace in first
//! ueci container exec ue4-ci:latest --workspace . -c "make test" -c "make package"
//!
//! # Long-lived container, driven step by step
//! ID=$(ueci container start ue4-ci:latest)
//! ueci container cp-in "$ID" ./Source /tmp/workspace/Source
//! ueci container glob "$ID" "/tmp/workspace/**/*.log"
//! ueci container stop "$ID"
//! ```
//!
use crate::core::error::Result;
use clap::{Parser, Subcommand};

mod build;
mod copy;
mod exec;
mod glob;
mod images;
mod start;
mod stop;

#[derive(Parser, Debug)]
pub struct ContainerArgs {
    #[command(subcommand)]
    command: ContainerCommand,
}

#[derive(Subcommand, Debug)]
enum ContainerCommand {
    /// Build an image from a directory containing a Dockerfile.
    Build(build::BuildArgs),
    /// List local images, optionally filtered by tag.
    Images(images::ImagesArgs),
    /// Start a detached, auto-removed container that stays up for `exec`.
    Start(start::StartArgs),
    /// Stop (and thereby remove) a container started with `start`.
    Stop(stop::StopArgs),
    /// Run commands in a fresh container from an image, then stop it.
    Exec(exec::ExecArgs),
    /// Copy a file or directory from the host into a container.
    CpIn(copy::CopyInArgs),
    /// Copy a file or directory from a container to the host.
    CpOut(copy::CopyOutArgs),
    /// Print the paths inside a container that match a glob pattern.
    Glob(glob::GlobArgs),
}

/// Dispatches `ueci container` subcommands.
pub async fn handle_container(args: ContainerArgs) -> Result<()> {
    match args.command {
        ContainerCommand::Build(args) => build::handle_build(args).await,
        ContainerCommand::Images(args) => images::handle_images(args).await,
        ContainerCommand::Start(args) => start::handle_start(args).await,
        ContainerCommand::Stop(args) => stop::handle_stop(args).await,
        ContainerCommand::Exec(args) => exec::handle_exec(args).await,
        ContainerCommand::CpIn(args) => copy::handle_copy_in(args).await,
        ContainerCommand::CpOut(args) => copy::handle_copy_out(args).await,
        ContainerCommand::Glob(args) => glob::handle_glob(args).await,
    }
}
