//! # ueci Git Command Group
//!
//! File: cli/src/commands/git/mod.rs
//!
//! ## Overview
//!
//! Prints Git metadata for use in CI scripts. Every subcommand takes an
//! optional `--repo` (default: current directory).
//!
//! ## Usage
//!
//! ```bash
//! ueci git ref                        # tag if checked out, else branch
//! ueci git commit-date                # e.g. 20230101
//! ueci git clone-command --shallow    # git clone --depth 1 -b main https://...
//! ```
//!
//! A detached `HEAD` has no branch and an untagged commit has no tag; those
//! print nothing and exit with an error, so scripts can branch on the status.
//!
use crate::common::git;
use crate::core::error::{Result, UeciError};
use anyhow::anyhow;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct GitArgs {
    /// Repository to query.
    #[arg(long, global = true, default_value = ".")]
    repo: PathBuf,

    #[command(subcommand)]
    command: GitCommand,
}

#[derive(Subcommand, Debug)]
enum GitCommand {
    /// Print the checked-out branch.
    Branch,
    /// Print the tag matching the checked-out commit.
    Tag,
    /// Print the checked-out tag, or the branch if there is none.
    Ref,
    /// Print the date of the latest commit as YYYYMMDD.
    CommitDate,
    /// List remote names, one per line.
    Remotes,
    /// Print a remote's URL (the first remote by default).
    RemoteUrl { remote: Option<String> },
    /// Print the `git clone` command that reproduces the current checkout.
    CloneCommand {
        /// Clone destination appended to the command.
        dest: Option<String>,
        #[arg(long)]
        progress: bool,
        /// Add `--depth 1`.
        #[arg(long)]
        shallow: bool,
    },
}

fn required(value: Option<String>, what: &str, repo: &std::path::Path) -> Result<String> {
    value.ok_or_else(|| {
        anyhow!(UeciError::VersionUnavailable(format!(
            "no {} checked out in {:?}",
            what, repo
        )))
    })
}

/// Dispatches `ueci git` subcommands.
pub async fn handle_git(args: GitArgs) -> Result<()> {
    let repo = args.repo.as_path();
    let output = match args.command {
        GitCommand::Branch => required(git::branch_name(repo)?, "branch", repo)?,
        GitCommand::Tag => required(git::tag_name(repo), "tag", repo)?,
        GitCommand::Ref => required(git::branch_or_tag_name(repo)?, "branch or tag", repo)?,
        GitCommand::CommitDate => git::commit_date(repo)?,
        GitCommand::Remotes => git::list_remotes(repo)?.join("\n"),
        GitCommand::RemoteUrl { remote } => git::remote_url(repo, remote.as_deref())?,
        GitCommand::CloneCommand {
            dest,
            progress,
            shallow,
        } => git::clone_command(repo, dest.as_deref(), progress, shallow)?.join(" "),
    };
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_args_parsing() {
        let args = GitArgs::try_parse_from(["git", "commit-date"]).unwrap();
        assert_eq!(args.repo, PathBuf::from("."));
        assert!(matches!(args.command, GitCommand::CommitDate));

        let args = GitArgs::try_parse_from([
            "git",
            "clone-command",
            "checkout",
            "--shallow",
            "--repo",
            "/src/game",
        ])
        .unwrap();
        assert_eq!(args.repo, PathBuf::from("/src/game"));
        match args.command {
            GitCommand::CloneCommand {
                dest,
                progress,
                shallow,
            } => {
                assert_eq!(dest.as_deref(), Some("checkout"));
                assert!(shallow && !progress);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_remote_url_optional_name() {
        let args = GitArgs::try_parse_from(["git", "remote-url", "upstream"]).unwrap();
        assert!(matches!(
            args.command,
            GitCommand::RemoteUrl { remote: Some(ref r) } if r == "upstream"
        ));
    }

    #[test]
    fn test_required_reports_missing_value() {
        let err = required(None, "tag", std::path::Path::new("/repo")).unwrap_err();
        assert!(err.to_string().contains("no tag checked out"));
        assert_eq!(required(Some("v1".into()), "tag", std::path::Path::new(".")).unwrap(), "v1");
    }
}
