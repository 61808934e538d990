//! Sequential download of manifest entries into the project
//!
//! Entries are processed strictly in order. The first failure stops the
//! sequence; the report keeps the keys that completed before it.

use super::fetcher::AssetSource;
use super::manifest::AssetManifestEntry;
use crate::error::{Error, Result};
use crate::fs;

/// Outcome of downloading a list of entries
#[derive(Debug, Default)]
pub struct DownloadReport {
    /// Keys downloaded successfully, in order
    pub completed: Vec<String>,
    /// Number of files written to disk
    pub files_written: usize,
    /// Key and error of the entry that stopped the sequence
    pub failure: Option<(String, Error)>,
}

impl DownloadReport {
    fn record(mut self, key: &str, step: Result<usize>) -> Self {
        match step {
            Ok(written) => {
                self.completed.push(key.to_string());
                self.files_written += written;
            }
            Err(e) => self.failure = Some((key.to_string(), e)),
        }
        self
    }

    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Completed keys, or the error that stopped the sequence
    pub fn into_result(self) -> Result<Vec<String>> {
        match self.failure {
            Some((_, e)) => Err(e),
            None => Ok(self.completed),
        }
    }
}

/// Copy each folder's full subtree to its destination, overwriting files
pub async fn download_folders<S: AssetSource>(
    source: &mut S,
    entries: &[AssetManifestEntry],
) -> DownloadReport {
    let mut report = DownloadReport::default();
    for entry in entries {
        if !report.is_complete() {
            break;
        }
        let step = copy_folder(source, entry).await;
        report = report.record(&entry.key, step);
    }
    report
}

/// Write each file verbatim to its destination
pub async fn download_files<S: AssetSource>(
    source: &mut S,
    entries: &[AssetManifestEntry],
) -> DownloadReport {
    let mut report = DownloadReport::default();
    for entry in entries {
        if !report.is_complete() {
            break;
        }
        let step = copy_file(source, entry).await;
        report = report.record(&entry.key, step);
    }
    report
}

async fn copy_folder<S: AssetSource>(source: &mut S, entry: &AssetManifestEntry) -> Result<usize> {
    let files = source.fetch_folder(entry).await?;

    fs::create_directory(&entry.destination).await?;
    for file in &files {
        let target_path = entry.destination.join(&file.relative_path);
        if let Some(parent) = target_path.parent() {
            fs::create_directory(parent).await?;
        }
        fs::write_file(&target_path, &file.contents).await?;
    }

    Ok(files.len())
}

async fn copy_file<S: AssetSource>(source: &mut S, entry: &AssetManifestEntry) -> Result<usize> {
    let contents = source.fetch_file(entry).await?;

    if let Some(parent) = entry.destination.parent() {
        fs::create_directory(parent).await?;
    }
    fs::write_file(&entry.destination, &contents).await?;

    Ok(1)
}
