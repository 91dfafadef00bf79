use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use crate::error::{DriverError, DriverResult};

/// Copy a prebuilt wrapper into place
///
/// Returns false without touching the target when `cache` is not a
/// regular file.
pub fn restore(cache: &Path, target: &Path) -> DriverResult<bool> {
    if !cache.is_file() {
        return Ok(false);
    }
    if same_file(cache, target) {
        return Ok(true);
    }

    ensure_parent_dir(target)?;
    fs::copy(cache, target).map_err(|source| DriverError::Io {
        action: "restore prebuild to",
        path: target.to_path_buf(),
        source,
    })?;

    Ok(true)
}

/// Save a freshly generated wrapper to the prebuild cache
///
/// Plain whole-file copy, a crash mid-copy can leave a partial cache file.
pub fn persist(target: &Path, cache: &Path) -> DriverResult<()> {
    if same_file(target, cache) {
        return Ok(());
    }

    ensure_parent_dir(cache)?;
    fs::copy(target, cache).map_err(|source| DriverError::Io {
        action: "copy generated wrapper to",
        path: cache.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// SHA-256 of a file as lowercase hex
pub fn digest(path: &Path) -> DriverResult<String> {
    let bytes = fs::read(path).map_err(|source| DriverError::Io {
        action: "read",
        path: path.to_path_buf(),
        source,
    })?;

    Ok(format!("{:x}", Sha256::digest(&bytes)))
}

/// Whether two paths name the same existing file
///
/// Copying a file onto itself truncates it.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Create the directory a file will be written into
fn ensure_parent_dir(file: &Path) -> DriverResult<()> {
    match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            fs::create_dir_all(dir).map_err(|source| DriverError::Io {
                action: "create directory",
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
