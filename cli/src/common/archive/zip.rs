//! # ueci Zip Archive Utilities
//!
//! File: cli/src/common/archive/zip.rs
//!
//! ## Overview
//!
//! Zip creation and extraction on top of the `zip` crate. This is the format the
//! packager produces for distributions.
//!
//! - **`write_zip`**: walks a directory (via `walkdir`) and writes every file and
//!   directory beneath it into a zip, using paths relative to that directory with
//!   forward slashes. On Unix the file mode is stored so packaged executables keep
//!   their execute bit.
//! - **`extract_zip`**: unpacks a zip file into a destination directory.
//!
use crate::core::error::{Result, UeciError};
use anyhow::{anyhow, Context};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;
use tracing::{debug, instrument};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Returns the zip entry name for `path` relative to `root`, always using `/`.
fn entry_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).with_context(|| {
        format!("Path {:?} is not inside archive root {:?}", path, root)
    })?;
    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/"))
}

#[cfg(unix)]
fn entry_options(metadata: &std::fs::Metadata) -> SimpleFileOptions {
    use std::os::unix::fs::PermissionsExt;
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(metadata.permissions().mode())
}

#[cfg(not(unix))]
fn entry_options(_metadata: &std::fs::Metadata) -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

/// Writes the contents of `root_dir` into a new zip file at `output`.
///
/// `root_dir` itself is not an entry; its children are stored at the top level.
///
/// # Errors
///
/// Returns an error if the directory cannot be walked, a file cannot be read, or
/// the output cannot be written.
#[instrument(fields(root_dir = %root_dir.display(), output = %output.display()))]
pub fn write_zip(root_dir: &Path, output: &Path) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create zip file {:?}", output))?;
    let mut writer = ZipWriter::new(BufWriter::new(file));

    for entry in WalkDir::new(root_dir).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk directory {:?}", root_dir))?;
        let name = entry_name(root_dir, entry.path())?;
        let metadata = entry
            .metadata()
            .with_context(|| format!("Failed to read metadata for {:?}", entry.path()))?;
        let options = entry_options(&metadata);

        if entry.file_type().is_dir() {
            writer
                .add_directory(format!("{}/", name), options)
                .map_err(|e| anyhow!(UeciError::Archive(e.to_string())))?;
        } else {
            debug!("Adding {} to zip", name);
            writer
                .start_file(name, options)
                .map_err(|e| anyhow!(UeciError::Archive(e.to_string())))?;
            let mut source = BufReader::new(
                File::open(entry.path())
                    .with_context(|| format!("Failed to open {:?}", entry.path()))?,
            );
            io::copy(&mut source, &mut writer)
                .with_context(|| format!("Failed to compress {:?}", entry.path()))?;
        }
    }

    writer
        .finish()
        .map_err(|e| anyhow!(UeciError::Archive(e.to_string())))
        .context("Failed to finalize zip archive")?;
    Ok(())
}

/// Extracts the zip file at `archive` into `dest`, creating `dest` if needed.
#[instrument(fields(archive = %archive.display(), dest = %dest.display()))]
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    let file =
        File::open(archive).with_context(|| format!("Failed to open zip file {:?}", archive))?;
    let mut zip = ZipArchive::new(BufReader::new(file))
        .map_err(|e| anyhow!(UeciError::Archive(format!("{:?}: {}", archive, e))))?;
    zip.extract(dest)
        .map_err(|e| anyhow!(UeciError::Archive(format!("{:?}: {}", archive, e))))
        .with_context(|| format!("Failed to extract zip into {:?}", dest))?;
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::tempdir;

    fn zip_names(path: &Path) -> BTreeSet<String> {
        let mut zip = ZipArchive::new(File::open(path).unwrap()).unwrap();
        (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_write_zip_uses_relative_names() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().join("Game");
        fs::create_dir_all(root.join("Binaries/Linux"))?;
        fs::write(root.join("Game.sh"), "#!/bin/sh")?;
        fs::write(root.join("Binaries/Linux/Game"), "elf")?;
        let out = dir.path().join("Game.zip");

        write_zip(&root, &out)?;

        let names = zip_names(&out);
        assert!(names.contains("Game.sh"));
        assert!(names.contains("Binaries/"));
        assert!(names.contains("Binaries/Linux/Game"));
        assert!(!names.iter().any(|n| n.starts_with("Game/")));
        Ok(())
    }

    #[test]
    fn test_zip_roundtrip_preserves_content() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().join("src");
        fs::create_dir_all(root.join("nested"))?;
        fs::write(root.join("nested/data.txt"), "payload")?;
        let out = dir.path().join("out.zip");
        write_zip(&root, &out)?;

        let dest = dir.path().join("extracted");
        extract_zip(&out, &dest)?;
        assert_eq!(fs::read_to_string(dest.join("nested/data.txt"))?, "payload");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_write_zip_keeps_execute_bit() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir()?;
        let root = dir.path().join("src");
        fs::create_dir_all(&root)?;
        let exe = root.join("Game.sh");
        fs::write(&exe, "#!/bin/sh")?;
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755))?;
        let out = dir.path().join("out.zip");
        write_zip(&root, &out)?;

        let mut zip = ZipArchive::new(File::open(&out)?)?;
        let mode = zip.by_name("Game.sh")?.unix_mode().unwrap_or(0);
        assert_eq!(mode & 0o111, 0o111);
        Ok(())
    }

    #[test]
    fn test_extract_zip_rejects_garbage() {
        let dir = tempdir().unwrap();
        let bogus = dir.path().join("bogus.zip");
        fs::write(&bogus, "not a zip").unwrap();
        let err = extract_zip(&bogus, &dir.path().join("out")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<UeciError>(),
            Some(UeciError::Archive(_))
        ));
    }
}
