//! Filesystem primitives the engine is built on.
//!
//! Every failure carries the offending path so CLI errors stay actionable.

use crate::error::{MvcError, Result};
use crate::layout;
use filetime::FileTime;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// List tracked regular files directly inside `dir`, sorted by name.
///
/// Metadata and changelog files are never reported.
pub fn list_files(dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| MvcError::io(dir, io::Error::from(e)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = match entry.file_name().to_str() {
            Some(name) => name.to_string(),
            None => {
                tracing::warn!("Skipping non UTF-8 file name: {:?}", entry.path());
                continue;
            }
        };
        if layout::is_reserved(&name) {
            continue;
        }
        files.push(name);
    }
    files.sort();
    Ok(files)
}

/// Copy `src` to `dst`, carrying the source modification time over.
///
/// Change detection compares mtimes, so a materialized file must keep the
/// timestamp it had when it was submitted.
pub fn copy_preserving_mtime(src: &Path, dst: &Path) -> Result<()> {
    let metadata = fs::metadata(src).map_err(|e| MvcError::io(src, e))?;
    fs::copy(src, dst).map_err(|e| MvcError::io(src, e))?;
    let mtime = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_mtime(dst, mtime).map_err(|e| MvcError::io(dst, e))?;
    tracing::debug!("Copied {} -> {}", src.display(), dst.display());
    Ok(())
}

pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| MvcError::io(path, e))?;
    tracing::debug!("Removed {}", path.display());
    Ok(())
}

/// Recursively delete `path`; a missing tree is not an error.
pub fn remove_tree(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            tracing::debug!("Removed tree {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(MvcError::io(path, e)),
    }
}

pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| MvcError::io(path, e))
}

pub fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|e| MvcError::io(from, e))
}

/// Modification time as nanoseconds since the Unix epoch.
pub fn mtime_nanos(path: &Path) -> Result<i64> {
    let metadata = fs::metadata(path).map_err(|e| MvcError::io(path, e))?;
    let mtime = FileTime::from_last_modification_time(&metadata);
    Ok(mtime.unix_seconds() * 1_000_000_000 + i64::from(mtime.nanoseconds()))
}
