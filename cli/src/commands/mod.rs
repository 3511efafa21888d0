//! # ueci Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! One module per top-level command group. Each defines its clap arguments
//! and an async `handle_*` entry point called from `main.rs`.
//!
//! ## Command Groups
//!
//! - `package`: clean, package and archive a project or plugin
//! - `archive`: compress and extract zip/tar/gztar archives
//! - `cache`: pick the cheapest available source
//! - `container`: build images and run commands in containers
//! - `git`: print repository metadata
//! - `storage`: upload and download cloud storage objects
//! - `engine`: locate the engine and install prebuilt plugins
//! - `conan`: copy Conan package contents
//! - `platform`: print the host platform label
//!
pub mod archive;
pub mod cache;
pub mod conan;
pub mod container;
pub mod engine;
pub mod git;
pub mod package;
pub mod platform;
pub mod storage;
