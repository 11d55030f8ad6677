//! File discovery: flat enumeration of a source directory.
//!
//! The archives arrive as flat directories of scans, so discovery is a
//! non-recursive listing filtered to the extensions a given operation cares
//! about. Results are sorted so repeated runs process files in the same
//! order, which keeps logs and reports comparable across runs.

use crate::error::PrepError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Enumerate the files in `dir` whose extension matches one of `extensions`
/// (compared case-insensitively, without the dot).
///
/// Subdirectories and extensionless files are ignored. A missing or
/// unreadable directory is fatal; an empty directory yields an empty list.
pub fn scan_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, PrepError> {
    if !dir.is_dir() {
        return Err(PrepError::SourceDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|source| PrepError::DirReadFailed {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| PrepError::DirReadFailed {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let lower = e.to_ascii_lowercase();
                extensions.iter().any(|want| *want == lower)
            })
            .unwrap_or(false);
        if matches {
            files.push(path);
        }
    }

    files.sort();
    debug!("Scanned {}: {} matching files", dir.display(), files.len());
    Ok(files)
}
