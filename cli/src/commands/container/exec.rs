//! # ueci Container Exec
//!
//! File: cli/src/commands/container/exec.rs
//!
//! ## Overview
//!
//! Runs one or more commands in a throwaway container:
//!
//! 1. Start a detached container from the image (`docker::start_for_exec`).
//! 2. Optionally copy a host directory into the platform's workspace directory
//!    (`/tmp/workspace` or `C:\workspace`).
//! 3. Run each `-c` command through the platform shell, then the trailing
//!    command (after `--`) verbatim, stopping at the first failure.
//! 4. Stop the container, whatever the outcome. It is removed on stop.
//!
//! ## Usage
//!
//! ```bash
//! ueci container exec ue4-ci:latest --workspace . -c "ls -la" -- python3 build.py
//! ```
//!
use crate::common::docker;
use crate::core::error::Result;
use anyhow::anyhow;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
pub struct ExecArgs {
    /// Image to run the commands in.
    image: String,

    /// Host directory copied into the container's workspace directory before running.
    #[arg(long)]
    workspace: Option<PathBuf>,

    /// Command line run through the container's shell. Repeatable, runs in order.
    #[arg(short = 'c', long = "command", value_name = "CMD")]
    commands: Vec<String>,

    /// Capture output and print it once each command finishes instead of streaming.
    #[arg(long)]
    capture: bool,

    /// Command run verbatim after the `-c` commands.
    #[arg(last = true, value_name = "ARGV")]
    argv: Vec<String>,
}

/// Expands the shell commands for `platform` and appends the verbatim command.
fn build_commands(platform: &str, shell_commands: &[String], argv: &[String]) -> Vec<Vec<String>> {
    let mut commands: Vec<Vec<String>> = shell_commands
        .iter()
        .map(|line| {
            let mut command = docker::shell_prefix(platform);
            command.push(line.clone());
            command
        })
        .collect();
    if !argv.is_empty() {
        commands.push(argv.to_vec());
    }
    commands
}

/// Command creating `dir` inside a container of `platform` if it is missing.
fn mkdir_command(platform: &str, dir: &str) -> Vec<String> {
    if platform.eq_ignore_ascii_case("windows") {
        let mut command = docker::shell_prefix(platform);
        command.push(format!("if not exist {0} mkdir {0}", dir));
        command
    } else {
        vec!["mkdir".to_string(), "-p".to_string(), dir.to_string()]
    }
}

async fn run_in_container(container: &str, args: &ExecArgs) -> Result<()> {
    let platform = docker::container_platform(container).await?;
    if let Some(host_dir) = &args.workspace {
        let workspace = docker::workspace_dir(&platform);
        info!("Copying {:?} into {}:{}", host_dir, container, workspace);
        docker::exec(container, &mkdir_command(&platform, workspace), true).await?;
        docker::copy_from_host(container, host_dir, workspace).await?;
    }

    let commands = build_commands(&platform, &args.commands, &args.argv);
    let outputs = docker::exec_multiple(
        container,
        &commands,
        args.capture,
        |command| info!("Running {:?}", command),
        |command| info!("Finished {:?}", command),
    )
    .await?;

    for output in outputs.into_iter().flatten() {
        print!("{}", output.stdout);
        eprint!("{}", output.stderr);
    }
    Ok(())
}

pub async fn handle_exec(args: ExecArgs) -> Result<()> {
    if args.commands.is_empty() && args.argv.is_empty() {
        return Err(anyhow!("No command given; pass -c <CMD> or a command after `--`"));
    }

    let container = docker::start_for_exec(&args.image, None).await?;
    let result = run_in_container(&container, &args).await;

    // A failed exec has already stopped (and removed) the container.
    if let Err(e) = docker::stop_container(&container, None).await {
        warn!("Could not stop container {}: {:#}", container, e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_args() {
        let args = ExecArgs::try_parse_from([
            "exec",
            "ue4-ci:latest",
            "--workspace",
            "Game",
            "-c",
            "ls",
            "--command",
            "make test",
            "--",
            "python3",
            "-V",
        ])
        .unwrap();
        assert_eq!(args.image, "ue4-ci:latest");
        assert_eq!(args.workspace, Some(PathBuf::from("Game")));
        assert_eq!(args.commands, vec!["ls", "make test"]);
        assert_eq!(args.argv, vec!["python3", "-V"]);
        assert!(!args.capture);
    }

    #[test]
    fn test_build_commands_per_platform() {
        let shell = vec!["echo hi".to_string()];
        let argv = vec!["whoami".to_string()];
        assert_eq!(
            build_commands("linux", &shell, &argv),
            vec![
                vec!["bash".to_string(), "-c".to_string(), "echo hi".to_string()],
                vec!["whoami".to_string()],
            ]
        );
        assert_eq!(
            build_commands("windows", &shell, &[]),
            vec![vec![
                "cmd".to_string(),
                "/S".to_string(),
                "/C".to_string(),
                "echo hi".to_string()
            ]]
        );
    }

    #[test]
    fn test_mkdir_command() {
        assert_eq!(
            mkdir_command("linux", "/tmp/workspace"),
            vec!["mkdir", "-p", "/tmp/workspace"]
        );
        assert_eq!(
            mkdir_command("windows", "C:\\workspace").last().map(String::as_str),
            Some("if not exist C:\\workspace mkdir C:\\workspace")
        );
    }

    #[tokio::test]
    async fn test_exec_requires_a_command() {
        let args = ExecArgs::try_parse_from(["exec", "img"]).unwrap();
        let err = handle_exec(args).await.unwrap_err();
        assert!(err.to_string().contains("No command given"));
    }
}
