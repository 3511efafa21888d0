//! # ueci TAR Archive Operations (`common::archive::tar`)
//!
//! File: cli/src/common/archive/tar.rs
//!
//! ## Overview
//!
//! TAR support built on the `tar` crate, with optional gzip via `flate2`. Used in
//! three places:
//!
//! - `archive compress --format tar|gztar` and the matching extraction path.
//! - Docker image builds, which upload the build context as a gzipped tarball.
//! - Copying files into and out of containers, where the Engine API speaks
//!   uncompressed tar in both directions.
//!
//! ## Architecture
//!
//! - **`tar_bytes`**: archives a directory's contents (or a single file under its
//!   own name) into an in-memory buffer.
//! - **`write_tar`**: the same, streamed to a file.
//! - **`unpack_tar`** / **`extract_tar`**: unpack from any reader or from a file.
//!
//! ```rust
//! use crate::common::archive::tar;
//! # fn main() -> crate::core::error::Result<()> {
//! let context = std::path::Path::new("docker/build");
//! let tar_gz_bytes: Vec<u8> = tar::tar_bytes(context, true)?;
//! // docker.build_image(options, None, Some(tar_gz_bytes.into()))
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{Result, UeciError};
use anyhow::{anyhow, Context};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, instrument};

/// Appends `source` to the builder: a directory's children at the archive root,
/// or a file under its own name.
fn append_source<W: Write>(builder: &mut tar::Builder<W>, source: &Path) -> Result<()> {
    if source.is_dir() {
        builder.append_dir_all("", source).with_context(|| {
            format!(
                "Failed to add directory '{}' contents to the tar archive",
                source.display()
            )
        })?;
    } else if source.is_file() {
        let name = source.file_name().ok_or_else(|| {
            anyhow!(UeciError::Archive(format!(
                "Cannot archive path without a file name: {:?}",
                source
            )))
        })?;
        builder
            .append_path_with_name(source, name)
            .with_context(|| format!("Failed to add file '{}' to the tar archive", source.display()))?;
    } else {
        return Err(anyhow!(UeciError::Archive(format!(
            "Cannot archive {:?}: path does not exist",
            source
        ))));
    }
    Ok(())
}

/// Writes `source` as a tar stream into `writer`, optionally gzip-compressed,
/// and returns the writer once every footer has been flushed.
fn pack_into<W: Write>(writer: W, source: &Path, gzip: bool) -> Result<W> {
    if gzip {
        let mut builder = tar::Builder::new(GzEncoder::new(writer, Compression::default()));
        append_source(&mut builder, source)?;
        let encoder = builder
            .into_inner()
            .context("Failed to finalize tar archive structure")?;
        encoder
            .finish()
            .context("Failed to finish gzip compression stream")
    } else {
        let mut builder = tar::Builder::new(writer);
        append_source(&mut builder, source)?;
        builder
            .into_inner()
            .context("Failed to finalize tar archive structure")
    }
}

/// Creates a tar archive of `source` in memory.
///
/// # Arguments
///
/// * `source` - A directory (its contents become the archive root) or a single file.
/// * `gzip` - Whether to gzip the resulting stream.
///
/// # Errors
///
/// Returns an `Err` if `source` does not exist or any entry cannot be read.
pub fn tar_bytes(source: &Path, gzip: bool) -> Result<Vec<u8>> {
    debug!("Building in-memory tar of {:?} (gzip: {})", source, gzip);
    pack_into(Vec::new(), source, gzip)
}

/// Creates a tar archive of the directory `root_dir` at `output`.
#[instrument(fields(root_dir = %root_dir.display(), output = %output.display()))]
pub fn write_tar(root_dir: &Path, output: &Path, gzip: bool) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create tar file {:?}", output))?;
    let mut writer = pack_into(BufWriter::new(file), root_dir, gzip)?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush tar file {:?}", output))?;
    Ok(())
}

/// Unpacks an uncompressed tar stream into `dest`.
pub fn unpack_tar<R: Read>(reader: R, dest: &Path) -> Result<()> {
    let mut archive = tar::Archive::new(reader);
    archive
        .unpack(dest)
        .with_context(|| format!("Failed to unpack tar archive into {:?}", dest))?;
    Ok(())
}

/// Extracts the tar (or gzipped tar) file at `archive` into `dest`.
#[instrument(fields(archive = %archive.display(), dest = %dest.display()))]
pub fn extract_tar(archive: &Path, dest: &Path, gzip: bool) -> Result<()> {
    let file =
        File::open(archive).with_context(|| format!("Failed to open tar file {:?}", archive))?;
    let reader = BufReader::new(file);
    if gzip {
        unpack_tar(GzDecoder::new(reader), dest)
    } else {
        unpack_tar(reader, dest)
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::tempdir;

    fn entry_names<R: Read>(reader: R) -> HashSet<String> {
        let mut archive = tar::Archive::new(reader);
        archive
            .entries()
            .unwrap()
            .map(|e| {
                e.unwrap()
                    .path()
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
                    .trim_end_matches('/')
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_tar_bytes_gzip_directory() -> Result<()> {
        let temp_dir = tempdir()?;
        let dir_path = temp_dir.path();
        fs::write(dir_path.join("Dockerfile"), "FROM scratch")?;
        fs::create_dir(dir_path.join("scripts"))?;
        fs::write(dir_path.join("scripts/setup.sh"), "true")?;

        let data = tar_bytes(dir_path, true)?;
        let names = entry_names(GzDecoder::new(data.as_slice()));
        assert!(names.contains("Dockerfile"));
        assert!(names.contains("scripts/setup.sh"));
        Ok(())
    }

    #[test]
    fn test_tar_bytes_single_file_uses_file_name() -> Result<()> {
        let temp_dir = tempdir()?;
        let file = temp_dir.path().join("build.log");
        fs::write(&file, "ok")?;

        let data = tar_bytes(&file, false)?;
        let names = entry_names(data.as_slice());
        assert_eq!(names, HashSet::from(["build.log".to_string()]));
        Ok(())
    }

    #[test]
    fn test_tar_bytes_missing_source() {
        let temp_dir = tempdir().unwrap();
        let err = tar_bytes(&temp_dir.path().join("nope"), false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<UeciError>(),
            Some(UeciError::Archive(_))
        ));
    }

    #[test]
    fn test_write_and_extract_gztar() -> Result<()> {
        let temp_dir = tempdir()?;
        let src = temp_dir.path().join("src");
        fs::create_dir_all(src.join("a/b"))?;
        fs::write(src.join("a/b/c.txt"), "deep")?;
        let out = temp_dir.path().join("out.tar.gz");

        write_tar(&src, &out, true)?;
        let dest = temp_dir.path().join("dest");
        extract_tar(&out, &dest, true)?;
        assert_eq!(fs::read_to_string(dest.join("a/b/c.txt"))?, "deep");
        Ok(())
    }
}
