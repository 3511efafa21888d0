//! # ueci Container Build
//!
//! File: cli/src/commands/container/build.rs
//!
//! Builds an image from a context directory, streaming the daemon's output,
//! and prints the resulting image ID.
//!
use crate::common::docker;
use crate::core::error::Result;
use anyhow::{anyhow, Context};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Build context directory.
    #[arg(default_value = ".")]
    context: PathBuf,

    /// Image name and tag, e.g. `ue4-ci:latest`. Defaults to `<context dir>:latest`.
    #[arg(short, long)]
    tag: Option<String>,

    /// Dockerfile path relative to the context.
    #[arg(short, long, default_value = "Dockerfile")]
    file: String,

    /// Build without the layer cache.
    #[arg(long)]
    no_cache: bool,
}

/// Tag used when `--tag` is omitted: the context directory's name, lowercased.
fn default_tag(context: &std::path::Path) -> Option<String> {
    context
        .file_name()
        .map(|name| format!("{}:latest", name.to_string_lossy().to_lowercase()))
}

pub async fn handle_build(args: BuildArgs) -> Result<()> {
    let context = std::fs::canonicalize(&args.context)
        .with_context(|| format!("Build context {:?} does not exist", args.context))?;
    if !context.join(&args.file).is_file() {
        return Err(anyhow!(crate::core::error::UeciError::Docker(format!(
            "Dockerfile '{}' not found in {:?}",
            args.file, context
        ))));
    }
    let tag = match args.tag {
        Some(tag) => tag,
        None => default_tag(&context).ok_or_else(|| {
            anyhow!("Cannot derive an image tag from {:?}; pass --tag", context)
        })?,
    };

    info!("Building image '{}' from {:?}", tag, context);
    let image_id = docker::build_image(&context, &tag, &args.file, args.no_cache).await?;
    match image_id {
        Some(id) => println!("{}", id),
        None => println!("{}", tag),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args() {
        let args = BuildArgs::try_parse_from(["build", "docker/linux", "-t", "ci:1", "--no-cache"])
            .unwrap();
        assert_eq!(args.context, PathBuf::from("docker/linux"));
        assert_eq!(args.tag.as_deref(), Some("ci:1"));
        assert_eq!(args.file, "Dockerfile");
        assert!(args.no_cache);
    }

    #[test]
    fn test_default_tag() {
        assert_eq!(
            default_tag(std::path::Path::new("/src/UE4-CI")).as_deref(),
            Some("ue4-ci:latest")
        );
    }

    #[tokio::test]
    async fn test_missing_dockerfile() {
        let temp = tempfile::tempdir().unwrap();
        let args = BuildArgs::try_parse_from(["build", temp.path().to_str().unwrap()]).unwrap();
        let err = handle_build(args).await.unwrap_err();
        assert!(err.to_string().contains("Dockerfile"));
    }
}
