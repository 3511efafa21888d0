//! # ueci CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! Shared helpers for the integration test crates in `cli/tests/`. Each test
//! file declares `mod common;` and uses what it needs.
//!
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// Returns a `Command` for the `ueci` binary built for this test run.
///
/// `XDG_CONFIG_HOME` points at an empty directory so a developer's user
/// configuration does not leak into the tests.
pub fn ueci_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ueci").expect("Failed to find ueci binary for testing");
    cmd.env("XDG_CONFIG_HOME", config_home).env_remove("RUST_LOG");
    cmd
}

/// Creates a project root containing `<name>.uproject` with the given JSON.
pub fn write_project(root: &Path, name: &str, descriptor: &str) -> PathBuf {
    fs::create_dir_all(root).expect("Failed to create project root");
    let path = root.join(format!("{}.uproject", name));
    fs::write(&path, descriptor).expect("Failed to write descriptor");
    path
}

/// Writes an executable shell script standing in for `ue4`.
///
/// `clean` and `package` calls are appended to `calls.log` in the working
/// directory; `package` runs `package_body` afterwards.
#[cfg(unix)]
pub fn write_fake_build_tool(dir: &Path, package_body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-ue4");
    let contents = format!(
        "#!/bin/sh\necho \"$@\" >> calls.log\nif [ \"$1\" = package ]; then\n{}\nfi\n",
        package_body
    );
    fs::write(&script, contents).expect("Failed to write fake build tool");
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755))
        .expect("Failed to mark fake build tool executable");
    script
}
