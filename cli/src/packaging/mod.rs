//! # ueci Packaging (`packaging`)
//!
//! File: cli/src/packaging/mod.rs
//!
//! ## Overview
//!
//! The packaging pipeline for Unreal projects and plugins, bottom-up:
//!
//! - **`descriptor`**: finds and parses the `.uproject`/`.uplugin` file.
//! - **`version`**: literal versions and version resolver strategies.
//! - **`template`**: archive filename template expansion.
//! - **`build_tool`**: the external build tool seam (`ue4 clean`/`ue4 package`).
//! - **`packager`**: the Clean → Package → Archive pipeline.
//!
pub mod build_tool;
pub mod descriptor;
pub mod packager;
pub mod template;
pub mod version;

pub use build_tool::UeCli;
pub use descriptor::DescriptorKind;
pub use packager::{Packager, PackagerOptions};
pub use version::VersionSpec;
