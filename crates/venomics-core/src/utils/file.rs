//! File system helpers for export output.

use crate::error::StorageError;
use std::fs;
use std::path::Path;

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists<P: AsRef<Path>>(path: P) -> Result<(), StorageError> {
    let path = path.as_ref();
    if !path.exists() {
        fs::create_dir_all(path).map_err(|source| StorageError::FileIo {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
    }
    Ok(())
}

/// Write UTF-8 text, replacing any existing file.
pub fn write_text_file<P: AsRef<Path>>(path: P, content: &str) -> Result<(), StorageError> {
    let path = path.as_ref();
    fs::write(path, content.as_bytes()).map_err(|source| StorageError::FileIo {
        path: path.to_string_lossy().to_string(),
        source,
    })
}
