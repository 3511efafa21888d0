//! # ueci System Utilities Module (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//!
//! ## Overview
//!
//! Host platform identification. Packaged archives carry the platform in their
//! file name (`Game-1.2.3-Linux.zip`), so the label must be stable and human
//! readable: `Linux`, `Mac` or `Windows`.
//!
//! The raw identifier follows the kernel naming reported by `uname`/Python's
//! `platform.system()` (`Linux`, `Darwin`, `Windows`); `normalize` then maps the
//! Darwin kernel name to `Mac` and leaves everything else untouched.
//!
//! ```rust
//! use crate::common::system;
//! let label = system::identifier(); // "Linux" on a Linux CI agent
//! assert_eq!(system::normalize("Darwin"), "Mac");
//! ```
//!
use tracing::debug;

/// Maps a Rust target OS name (`std::env::consts::OS`) to its kernel-style name.
fn raw_identifier_for(os: &str) -> String {
    match os {
        "linux" => "Linux".to_string(),
        "macos" => "Darwin".to_string(),
        "windows" => "Windows".to_string(),
        "freebsd" => "FreeBSD".to_string(),
        "netbsd" => "NetBSD".to_string(),
        "openbsd" => "OpenBSD".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

/// Returns the kernel-style name of the host OS (`Linux`, `Darwin`, `Windows`, ...).
pub fn raw_identifier() -> String {
    raw_identifier_for(std::env::consts::OS)
}

/// Normalizes a raw OS identifier into the label used in archive names.
pub fn normalize(raw: &str) -> String {
    if raw == "Darwin" {
        "Mac".to_string()
    } else {
        raw.to_string()
    }
}

/// Returns a human-readable identifier for the host platform (`Windows`, `Mac`, `Linux`).
pub fn identifier() -> String {
    let raw = raw_identifier();
    let label = normalize(&raw);
    debug!("Host platform: {} (raw: {})", label, raw);
    label
}
