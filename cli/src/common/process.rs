//! # ueci Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::process::Command` used by every collaborator that
//! shells out (the build tool, Git, Conan, `ue4 root`).
//!
//! - **`run`**: runs a command with inherited stdio so its output appears in the
//!   CI log as it happens. A non-zero exit is returned as
//!   `UeciError::ExternalCommand`.
//! - **`capture`**: runs a command and returns its trimmed stdout. Stderr is
//!   either passed through or discarded. On failure the captured stderr is kept
//!   in the error so the caller sees the diagnostic.
//!
//! Neither function retries.
//!
//! ```rust
//! use crate::common::process;
//! # fn run_example() -> crate::core::error::Result<()> {
//! let repo = std::path::Path::new(".");
//! let branch = process::capture("git", &["rev-parse", "--abbrev-ref", "HEAD"], Some(repo), true)?;
//! process::run("ue4", &["package".to_string()], Some(repo))?;
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{Result, UeciError};
use anyhow::{anyhow, Context};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info};

fn describe<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    std::iter::once(program.to_string())
        .chain(args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs an external command, streaming its output to the console.
///
/// # Errors
///
/// * The program could not be spawned (e.g. not on `PATH`).
/// * `UeciError::ExternalCommand` if the process exits unsuccessfully. The output
///   field notes that the output was printed above, since it was not captured.
pub fn run<S: AsRef<OsStr>>(program: &str, args: &[S], cwd: Option<&Path>) -> Result<()> {
    let cmd_line = describe(program, args);
    info!("Running: {} (cwd: {:?})", cmd_line, cwd);

    let mut command = Command::new(program);
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }
    let status = command
        .status()
        .with_context(|| format!("Failed to execute '{}'", cmd_line))?;

    if !status.success() {
        return Err(anyhow!(UeciError::ExternalCommand {
            cmd: cmd_line,
            status: status.to_string(),
            output: "printed above".to_string(),
        }));
    }
    debug!("Command '{}' completed successfully.", cmd_line);
    Ok(())
}

/// Runs an external command and returns its stdout with surrounding whitespace trimmed.
///
/// When `suppress_stderr` is `false`, stderr is inherited so diagnostics still
/// reach the console. When it is `true`, stderr is captured instead and only
/// surfaces inside the error on failure.
pub fn capture<S: AsRef<OsStr>>(
    program: &str,
    args: &[S],
    cwd: Option<&Path>,
    suppress_stderr: bool,
) -> Result<String> {
    let cmd_line = describe(program, args);
    debug!("Capturing: {} (cwd: {:?})", cmd_line, cwd);

    let mut command = Command::new(program);
    command.args(args).stdout(Stdio::piped());
    command.stderr(if suppress_stderr {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }
    let output = command
        .output()
        .with_context(|| format!("Failed to execute '{}'", cmd_line))?;

    if !output.status.success() {
        return Err(anyhow!(UeciError::ExternalCommand {
            cmd: cmd_line,
            status: output.status.to_string(),
            output: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

// --- Unit Tests ---
#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_capture_trims_stdout() -> Result<()> {
        let out = capture("sh", &["-c", "printf '  hello\\n\\n'"], None, true)?;
        assert_eq!(out, "hello");
        Ok(())
    }

    #[test]
    fn test_capture_uses_cwd() -> Result<()> {
        let dir = tempdir()?;
        let out = capture("pwd", &[] as &[&str], Some(dir.path()), true)?;
        assert!(out.ends_with(dir.path().file_name().unwrap().to_str().unwrap()));
        Ok(())
    }

    #[test]
    fn test_capture_failure_keeps_stderr() {
        let err = capture("sh", &["-c", "echo boom >&2; exit 3"], None, true).unwrap_err();
        match err.downcast_ref::<UeciError>() {
            Some(UeciError::ExternalCommand { status, output, .. }) => {
                assert!(status.contains('3'));
                assert_eq!(output, "boom");
            }
            other => panic!("Unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_run_propagates_exit_status() {
        let err = run("sh", &["-c", "exit 2"], None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<UeciError>(),
            Some(UeciError::ExternalCommand { .. })
        ));
    }

    #[test]
    fn test_run_missing_program() {
        let result = run("definitely-not-a-real-program-ueci", &["x"], None);
        assert!(result.is_err());
    }
}
