//! Component templates and starter template downloads
//!
//! This module provides:
//! - Component template rendering (web and mobile sets)
//! - Asset manifests describing which starter folders and files to fetch
//! - Template fetching from GitHub or a local checkout
//! - Sequential copying of fetched assets into the project

pub mod copier;
pub mod engine;
pub mod fetcher;
pub mod manifest;

pub use copier::{download_files, download_folders, DownloadReport};
pub use engine::TemplateEngine;
pub use fetcher::{AssetSource, FolderFile, TemplateFetcher, TemplateSource};
pub use manifest::{AssetManifest, AssetManifestEntry};
