//! # ueci Container Stop
//!
//! File: cli/src/commands/container/stop.rs
//!
//! Stops one or more containers. A container that is already gone counts as
//! stopped.
//!
use crate::common::docker;
use crate::core::error::{Result, UeciError};
use clap::Parser;
use tracing::warn;

#[derive(Parser, Debug)]
pub struct StopArgs {
    /// Names or IDs of the containers to stop.
    #[arg(required = true, num_args = 1..)]
    containers: Vec<String>,

    /// Seconds to wait before the container is killed.
    #[arg(short, long)]
    time: Option<i64>,
}

pub async fn handle_stop(args: StopArgs) -> Result<()> {
    for container in &args.containers {
        match docker::stop_container(container, args.time).await {
            Ok(()) => println!("Stopped container '{}'", container),
            Err(e)
                if matches!(
                    e.downcast_ref::<UeciError>(),
                    Some(UeciError::ContainerNotFound { .. })
                ) =>
            {
                warn!("Container '{}' not found.", container);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
