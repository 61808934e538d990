//! Asset manifests: which folders and files of a starter repository land
//! where in the project

use crate::error::Result;
use crate::platform::{Platform, PlatformConfig};
use std::path::{Path, PathBuf};

/// Source folders copied individually for React Native projects
const MOBILE_SRC_FOLDERS: &[&str] = &[
    "api",
    "config",
    "constants",
    "hooks",
    "i18n",
    "navigation",
    "screens",
    "services",
    "store",
    "theme",
    "types",
    "utils",
];

/// Individual files fetched for React Native projects (path in repository,
/// destination relative to the project root)
const MOBILE_FILES: &[(&str, &str)] = &[
    ("src/App.tsx", "src/App.tsx"),
    ("index.js", "index.js"),
    ("metro.config.js", "metro.config.js"),
];

/// One folder or file to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetManifestEntry {
    /// Short label for messages
    pub key: String,
    /// Remote locator (folders) or raw URL (files)
    pub source: String,
    /// Path inside the starter repository
    pub repo_path: String,
    /// Absolute destination under the project root
    pub destination: PathBuf,
}

/// Folders and files for one init run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetManifest {
    pub folders: Vec<AssetManifestEntry>,
    pub files: Vec<AssetManifestEntry>,
}

impl AssetManifest {
    /// Build the manifest for `config` targeting `project_root`
    pub fn for_platform(config: &PlatformConfig, project_root: &Path) -> Result<Self> {
        let repo = config.repo()?;

        let folder = |key: &str, repo_path: &str| AssetManifestEntry {
            key: key.to_string(),
            source: repo.join(repo_path).to_string(),
            repo_path: repo_path.to_string(),
            destination: project_root.join(repo_path),
        };

        let folders = match config.platform {
            Platform::Mobile => std::iter::once(folder("assets", "assets"))
                .chain(
                    MOBILE_SRC_FOLDERS
                        .iter()
                        .map(|&name| folder(name, &format!("src/{}", name))),
                )
                .collect(),
            // The whole source tree comes from the React template
            Platform::Web => vec![folder("src", "src")],
        };

        let files = match config.platform {
            Platform::Mobile => MOBILE_FILES
                .iter()
                .map(|&(repo_path, dest)| AssetManifestEntry {
                    key: repo_path.rsplit('/').next().unwrap_or(repo_path).to_string(),
                    source: format!("{}/{}", config.raw_base_url.trim_end_matches('/'), repo_path),
                    repo_path: repo_path.to_string(),
                    destination: project_root.join(dest),
                })
                .collect(),
            Platform::Web => Vec::new(),
        };

        Ok(Self { folders, files })
    }
}
