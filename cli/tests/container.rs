//! # ueci Container Integration Tests
//!
//! File: cli/tests/container.rs
//!
//! These need a running Docker daemon and the `ubuntu:22.04` image, so they
//! are ignored by default.
//!
mod common;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
#[ignore] // Requires Docker
fn test_container_exec_streams_output() {
    let home = tempdir().unwrap();
    ueci_cmd(home.path())
        .args(["container", "exec", "ubuntu:22.04", "--capture", "-c", "echo hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello"));
}

#[test]
#[ignore] // Requires Docker
fn test_container_exec_failure_is_reported() {
    let home = tempdir().unwrap();
    ueci_cmd(home.path())
        .args(["container", "exec", "ubuntu:22.04", "--", "false"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_container_exec_requires_command() {
    let home = tempdir().unwrap();
    ueci_cmd(home.path())
        .args(["container", "exec", "ubuntu:22.04"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No command given"));
}
