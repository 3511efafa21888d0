//! # ueci Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point of the `ueci` CLI, a set of helpers for scripting continuous
//! integration of Unreal Engine projects and plugins. It:
//! - parses the command line with clap,
//! - configures `tracing` from the `-v` count (overridable with `RUST_LOG`),
//! - routes to the command group handlers in `commands`.
//!
//! Errors from every handler surface here, are printed as `Error: ...` and end
//! the process with exit status 1.
//!
//! ## Usage
//!
//! ```bash
//! ueci --help
//! ueci -vv package --strip-debug
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod common;
mod core;
mod packaging;

#[derive(Parser, Debug)]
#[command(
    name = "ueci",
    about = "Continuous integration helpers for Unreal Engine projects and plugins",
    long_about = "Package projects and plugins into versioned archives, and script the \
                  surrounding CI chores: archives, caches, containers, Git metadata, \
                  cloud storage, engine plugins and Conan packages.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "p")]
    Package(commands::package::PackageArgs),
    /// Compress and extract archives.
    Archive(commands::archive::ArchiveArgs),
    /// Select the cheapest available source for a resource.
    Cache(commands::cache::CacheArgs),
    /// Build images and run commands in containers.
    #[command(alias = "c")]
    Container(commands::container::ContainerArgs),
    /// Print Git repository metadata.
    Git(commands::git::GitArgs),
    /// Upload and download cloud storage objects.
    Storage(commands::storage::StorageArgs),
    /// Locate the engine and install prebuilt plugins.
    Engine(commands::engine::EngineArgs),
    /// Copy Conan package contents.
    Conan(commands::conan::ConanArgs),
    Platform(commands::platform::PlatformArgs),
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(cli.verbose)));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Package(args) => commands::package::handle_package(args).await,
        Commands::Archive(args) => commands::archive::handle_archive(args).await,
        Commands::Cache(args) => commands::cache::handle_cache(args).await,
        Commands::Container(args) => commands::container::handle_container(args).await,
        Commands::Git(args) => commands::git::handle_git(args).await,
        Commands::Storage(args) => commands::storage::handle_storage(args).await,
        Commands::Engine(args) => commands::engine::handle_engine(args).await,
        Commands::Conan(args) => commands::conan::handle_conan(args).await,
        Commands::Platform(args) => commands::platform::handle_platform(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_verbosity() {
        assert_eq!(log_level(0), "warn");
        assert_eq!(log_level(1), "info");
        assert_eq!(log_level(2), "debug");
        assert_eq!(log_level(7), "trace");
    }

    #[test]
    fn test_global_verbose_after_subcommand() {
        let cli = Cli::try_parse_from(["ueci", "platform", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Platform(_)));
    }

    #[test]
    fn test_every_group_parses() {
        for argv in [
            vec!["ueci", "package", "--skip-archive"],
            vec!["ueci", "archive", "extract", "a.zip", "out"],
            vec!["ueci", "cache", "select", "a"],
            vec!["ueci", "container", "start", "img"],
            vec!["ueci", "git", "branch"],
            vec!["ueci", "storage", "download", "b", "k", "f"],
            vec!["ueci", "engine", "root"],
            vec!["ueci", "conan", "copy-package", "zlib/ue4@adamrehn/profile", "out"],
            vec!["ueci", "platform"],
        ] {
            assert!(Cli::try_parse_from(&argv).is_ok(), "failed to parse {:?}", argv);
        }
    }
}
