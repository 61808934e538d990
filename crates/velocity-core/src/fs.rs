//! Filesystem helpers used by both pipelines
//!
//! Each helper is a single fail-fast call that turns the I/O error into
//! [`Error::Filesystem`] carrying the offending path.

use crate::error::{Error, Result};
use std::path::Path;
use tokio::fs;

/// Create a directory and all of its parents. Existing directories are fine.
pub async fn create_directory(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| Error::fs("Error creating directory at", dir, e))
}

/// Write `content` to `path`, replacing any existing file
pub async fn write_file(path: &Path, content: impl AsRef<[u8]>) -> Result<()> {
    fs::write(path, content)
        .await
        .map_err(|e| Error::fs("Error writing file at", path, e))
}

/// Move a file, creating the destination directory when needed
pub async fn move_file(source: &Path, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        create_directory(parent).await?;
    }
    fs::rename(source, destination)
        .await
        .map_err(|e| Error::fs("Error moving file from", source, e))
}

/// Read a UTF-8 template file
pub async fn read_template(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .await
        .map_err(|e| Error::fs("Error reading template at", path, e))
}
