//! # ueci Container Start
//!
//! File: cli/src/commands/container/start.rs
//!
//! Starts a detached container that stays alive for `exec` calls, and prints
//! its ID. The container is removed automatically when stopped.
//!
use crate::common::docker;
use crate::core::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct StartArgs {
    /// Image to start.
    image: String,

    /// Container name.
    #[arg(long)]
    name: Option<String>,
}

pub async fn handle_start(args: StartArgs) -> Result<()> {
    let id = docker::start_for_exec(&args.image, args.name.as_deref()).await?;
    println!("{}", id);
    Ok(())
}
