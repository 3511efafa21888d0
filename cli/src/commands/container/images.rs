//! # ueci Container Images
//!
//! File: cli/src/commands/container/images.rs
//!
//! Lists local images as `<id>  <tags>`, optionally filtered by a tag glob.
//!
use crate::common::docker;
use crate::core::error::Result;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct ImagesArgs {
    /// Glob matched against repository tags, e.g. `ue4-ci:*`.
    #[arg(short, long)]
    filter: Option<String>,
}

fn short_id(id: &str) -> &str {
    let id = id.strip_prefix("sha256:").unwrap_or(id);
    &id[..id.len().min(12)]
}

pub async fn handle_images(args: ImagesArgs) -> Result<()> {
    let images = docker::list_images(args.filter.as_deref()).await?;
    for image in images {
        println!("{}  {}", short_id(&image.id), image.repo_tags.join(", "));
    }
    Ok(())
}
