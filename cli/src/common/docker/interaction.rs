//! # ueci Docker Container Interaction
//!
//! File: cli/src/common/docker/interaction.rs
//!
//! ## Overview
//!
//! Runs commands inside containers started by `lifecycle::start_for_exec`.
//!
//! - **`exec`**: runs one command. Output is either streamed to the host's
//!   stdout/stderr as it arrives or captured and returned. A non-zero exit code
//!   stops the container (so a failed CI step never leaves a worker behind) and
//!   fails with `UeciError::ExternalCommand` carrying the exit code and output.
//! - **`exec_multiple`**: runs commands in order with caller-supplied hooks
//!   before and after each one, stopping at the first failure.
//! - **`glob`**: lists files inside the container matching a pattern, using the
//!   container's Python interpreter.
//!
use crate::core::error::{Result, UeciError};
use anyhow::{anyhow, Context};
use bollard::container::LogOutput;
use bollard::exec::{CreateExecOptions, StartExecResults};
use futures_util::StreamExt;
use tokio::io::{stderr, stdout, AsyncWriteExt};
use tracing::{debug, error, info, instrument, warn};

use super::connect::{connect_docker, map_not_found};
use super::lifecycle::{container_platform, stop_container};

/// Captured output of a command run with `exec(.., capture = true)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Executes `command` in `container`, streaming or capturing its output.
///
/// # Returns
///
/// `Some(ExecOutput)` when `capture` is set, otherwise `None`.
///
/// # Errors
///
/// * `UeciError::ContainerNotFound` if the container does not exist.
/// * `UeciError::ExternalCommand` if the command exits non-zero. The container has
///   been stopped by the time this is returned.
#[instrument(skip(command), fields(command = ?command))]
pub async fn exec(container: &str, command: &[String], capture: bool) -> Result<Option<ExecOutput>> {
    let docker = connect_docker().await?;

    let created = docker
        .create_exec(
            container,
            CreateExecOptions {
                attach_stdout: Some(true),
                attach_stderr: Some(true),
                cmd: Some(command.to_vec()),
                ..Default::default()
            },
        )
        .await
        .map_err(|e| {
            map_not_found(
                e,
                UeciError::ContainerNotFound {
                    name: container.to_string(),
                },
                &format!("Failed to create exec instance in container '{}'", container),
            )
        })?;
    let exec_id = created.id;
    debug!("Created exec instance {}", exec_id);

    let mut captured = ExecOutput::default();
    match docker
        .start_exec(&exec_id, None)
        .await
        .map_err(|e| anyhow!(UeciError::DockerApi { source: e }))
        .context("Failed to start exec instance")?
    {
        StartExecResults::Attached { mut output, .. } => {
            let mut host_stdout = stdout();
            let mut host_stderr = stderr();
            while let Some(chunk) = output.next().await {
                match chunk.map_err(|e| anyhow!(UeciError::DockerApi { source: e }))? {
                    LogOutput::StdOut { message } | LogOutput::Console { message } => {
                        if capture {
                            captured.stdout.push_str(&String::from_utf8_lossy(&message));
                        } else {
                            host_stdout.write_all(&message).await?;
                            host_stdout.flush().await?;
                        }
                    }
                    LogOutput::StdErr { message } => {
                        if capture {
                            captured.stderr.push_str(&String::from_utf8_lossy(&message));
                        } else {
                            host_stderr.write_all(&message).await?;
                            host_stderr.flush().await?;
                        }
                    }
                    LogOutput::StdIn { .. } => {}
                }
            }
        }
        StartExecResults::Detached => {
            warn!("Exec instance {} unexpectedly started detached", exec_id);
        }
    }

    let exit_code = docker
        .inspect_exec(&exec_id)
        .await
        .map_err(|e| anyhow!(UeciError::DockerApi { source: e }))
        .with_context(|| format!("Failed to inspect exec instance '{}'", exec_id))?
        .exit_code
        .unwrap_or(-1);

    if exit_code != 0 {
        error!(
            "Command {:?} failed in container {} with exit code {}",
            command, container, exit_code
        );
        if let Err(stop_err) = stop_container(container, None).await {
            warn!("Failed to stop container {}: {:#}", container, stop_err);
        }
        let output = if capture {
            format!("stdout: {:?}, stderr: {:?}", captured.stdout, captured.stderr)
        } else {
            "printed above".to_string()
        };
        return Err(anyhow!(UeciError::ExternalCommand {
            cmd: format!("{:?}", command),
            status: format!("exit code {}", exit_code),
            output,
        }))
        .with_context(|| format!("Failed to run command {:?} in container", command));
    }

    Ok(if capture { Some(captured) } else { None })
}

/// Executes several commands in order, invoking `pre_hook`/`post_hook` around each.
///
/// Stops at the first failing command. Returns one entry per command that ran.
pub async fn exec_multiple<Pre, Post>(
    container: &str,
    commands: &[Vec<String>],
    capture: bool,
    mut pre_hook: Pre,
    mut post_hook: Post,
) -> Result<Vec<Option<ExecOutput>>>
where
    Pre: FnMut(&[String]),
    Post: FnMut(&[String]),
{
    let mut outputs = Vec::with_capacity(commands.len());
    for command in commands {
        pre_hook(command);
        outputs.push(exec(container, command, capture).await?);
        post_hook(command);
    }
    Ok(outputs)
}

/// Builds the interpreter invocation that prints the matches of `pattern`, one per line.
pub fn glob_command(platform: &str, pattern: &str) -> Result<Vec<String>> {
    let interpreter = if platform.eq_ignore_ascii_case("windows") {
        "python"
    } else {
        "python3"
    };
    let literal = serde_json::to_string(pattern).context("Failed to encode glob pattern")?;
    Ok(vec![
        interpreter.to_string(),
        "-c".to_string(),
        format!("import glob; print(\"\\n\".join(glob.glob({})))", literal),
    ])
}

/// Lists the files inside `container` that match `pattern`.
#[instrument]
pub async fn glob(container: &str, pattern: &str) -> Result<Vec<String>> {
    let platform = container_platform(container).await?;
    let command = glob_command(&platform, pattern)?;
    let output = exec(container, &command, true).await?.unwrap_or_default();
    let matches: Vec<String> = output
        .stdout
        .trim()
        .lines()
        .map(|l| l.trim_end_matches('\r').to_string())
        .filter(|l| !l.is_empty())
        .collect();
    info!("{} paths match '{}' in container {}", matches.len(), pattern, container);
    Ok(matches)
}
