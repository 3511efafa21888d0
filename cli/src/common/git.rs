//! # ueci Git Utilities (`common::git`)
//!
//! File: cli/src/common/git.rs
//!
//! ## Overview
//!
//! Read-only queries against a Git working copy, implemented by invoking the
//! `git` CLI through `common::process::capture`. These feed version strings
//! (`commit_date`, `tag_name`) and let CI scripts reproduce the current checkout
//! elsewhere (`clone_command`).
//!
//! "Not found" outcomes are `None` rather than errors: a detached `HEAD` has no
//! branch name and a commit without an exact tag has no tag name.
//!
use crate::common::process;
use crate::core::error::{Result, UeciError};
use anyhow::{anyhow, Context};
use chrono::DateTime;
use std::path::Path;
use tracing::{debug, instrument};

fn git(repo: &Path, args: &[&str], suppress_stderr: bool) -> Result<String> {
    process::capture("git", args, Some(repo), suppress_stderr)
}

/// Returns the name of the branch checked out in `repo`, or `None` for a detached `HEAD`.
#[instrument(fields(repo = %repo.display()))]
pub fn branch_name(repo: &Path) -> Result<Option<String>> {
    let branch = git(repo, &["rev-parse", "--abbrev-ref", "HEAD"], true)?;
    Ok(if branch == "HEAD" { None } else { Some(branch) })
}

/// Returns the tag that exactly matches the checked-out commit, if any.
#[instrument(fields(repo = %repo.display()))]
pub fn tag_name(repo: &Path) -> Option<String> {
    match git(repo, &["describe", "--tags", "--exact-match"], true) {
        Ok(tag) if !tag.is_empty() => Some(tag),
        Ok(_) => None,
        Err(e) => {
            debug!("No tag checked out: {:#}", e);
            None
        }
    }
}

/// Returns the checked-out tag if there is one, otherwise the branch name.
pub fn branch_or_tag_name(repo: &Path) -> Result<Option<String>> {
    match tag_name(repo) {
        Some(tag) => Ok(Some(tag)),
        None => branch_name(repo),
    }
}

/// Converts `git log --format=%ai` output (e.g. `2023-01-01 12:34:56 +0100`) to `YYYYMMDD`.
///
/// The date is taken in the commit's own timezone.
pub fn format_commit_date(raw: &str) -> Result<String> {
    let parsed = DateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M:%S %z")
        .with_context(|| format!("Unrecognised commit date '{}'", raw.trim()))?;
    Ok(parsed.format("%Y%m%d").to_string())
}

/// Returns the date of the most recent commit in `repo` formatted as `YYYYMMDD`.
#[instrument(fields(repo = %repo.display()))]
pub fn commit_date(repo: &Path) -> Result<String> {
    let raw = git(repo, &["log", "-n", "1", "--format=format:%ai"], false)?;
    format_commit_date(&raw)
}

/// Splits `git remote` output into remote names.
fn parse_remotes(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lists the names of the remotes configured for `repo`.
pub fn list_remotes(repo: &Path) -> Result<Vec<String>> {
    Ok(parse_remotes(&git(repo, &["remote"], false)?))
}

/// Returns the URL of `remote`, defaulting to the first configured remote.
///
/// # Errors
///
/// Fails if the repository has no remotes, or if `git remote get-url` fails.
pub fn remote_url(repo: &Path, remote: Option<&str>) -> Result<String> {
    let remote = match remote {
        Some(r) => r.to_string(),
        None => list_remotes(repo)?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Repository {:?} has no remotes configured", repo))?,
    };
    git(repo, &["remote", "get-url", &remote], false)
}

/// Assembles a `git clone` invocation from its parts.
fn assemble_clone_command(
    reference: &str,
    url: &str,
    dest: Option<&str>,
    progress: bool,
    shallow: bool,
) -> Vec<String> {
    let mut command = vec!["git".to_string(), "clone".to_string()];
    if progress {
        command.push("--progress".to_string());
    }
    if shallow {
        command.extend(["--depth".to_string(), "1".to_string()]);
    }
    command.extend(["-b".to_string(), reference.to_string(), url.to_string()]);
    if let Some(dest) = dest {
        command.push(dest.to_string());
    }
    command
}

/// Generates the `git clone` command that reproduces the checkout of `repo`.
///
/// The command clones the first remote at the current tag (or branch).
///
/// # Errors
///
/// Fails when `HEAD` is detached and untagged, since there is no ref to pass to `-b`.
pub fn clone_command(
    repo: &Path,
    dest: Option<&str>,
    progress: bool,
    shallow: bool,
) -> Result<Vec<String>> {
    let reference = branch_or_tag_name(repo)?.ok_or_else(|| {
        anyhow!(UeciError::VersionUnavailable(format!(
            "Repository {:?} has neither a branch nor a tag checked out",
            repo
        )))
    })?;
    let url = remote_url(repo, None)?;
    Ok(assemble_clone_command(&reference, &url, dest, progress, shallow))
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_format_commit_date() -> Result<()> {
        assert_eq!(format_commit_date("2023-01-01 12:34:56 +0100")?, "20230101");
        assert_eq!(format_commit_date("2019-12-31 23:59:59 -0800\n")?, "20191231");
        assert!(format_commit_date("yesterday").is_err());
        Ok(())
    }

    #[test]
    fn test_parse_remotes_handles_crlf() {
        assert_eq!(
            parse_remotes("origin\r\nupstream\r\n"),
            vec!["origin".to_string(), "upstream".to_string()]
        );
        assert!(parse_remotes("").is_empty());
    }

    #[test]
    fn test_assemble_clone_command() {
        assert_eq!(
            assemble_clone_command("v1.0", "https://git/x.git", Some("out"), true, true),
            vec!["git", "clone", "--progress", "--depth", "1", "-b", "v1.0", "https://git/x.git", "out"]
        );
        assert_eq!(
            assemble_clone_command("main", "u", None, false, false),
            vec!["git", "clone", "-b", "main", "u"]
        );
    }

    fn init_repo(dir: &Path) -> Result<()> {
        for args in [
            vec!["init", "-q", "-b", "main"],
            vec!["config", "user.email", "ci@example.com"],
            vec!["config", "user.name", "CI"],
            vec!["remote", "add", "origin", "https://example.com/game.git"],
            vec!["commit", "-q", "--allow-empty", "-m", "init"],
        ] {
            git(dir, &args, true)?;
        }
        Ok(())
    }

    #[test]
    #[ignore] // Requires the git CLI
    fn test_queries_against_real_repo() -> Result<()> {
        let dir = tempdir()?;
        init_repo(dir.path())?;

        assert_eq!(branch_name(dir.path())?, Some("main".to_string()));
        assert_eq!(tag_name(dir.path()), None);
        assert_eq!(commit_date(dir.path())?.len(), 8);
        assert_eq!(list_remotes(dir.path())?, vec!["origin".to_string()]);
        assert_eq!(remote_url(dir.path(), None)?, "https://example.com/game.git");

        git(dir.path(), &["tag", "v2.0.0"], true)?;
        assert_eq!(branch_or_tag_name(dir.path())?, Some("v2.0.0".to_string()));
        assert_eq!(
            clone_command(dir.path(), None, false, true)?,
            vec!["git", "clone", "--depth", "1", "-b", "v2.0.0", "https://example.com/game.git"]
        );
        Ok(())
    }
}
