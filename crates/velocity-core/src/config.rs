//! Project configuration file (`rc.yaml` in the project root)
//!
//! ```yaml
//! package_manager: pnpm
//! template_dir: ./templates/components
//! open_docs: false
//! ```

use crate::error::{Error, Result};
use crate::package::PackageManager;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the project root
pub const CONFIG_FILE: &str = "rc.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Package manager to use instead of lockfile detection
    #[serde(default)]
    pub package_manager: Option<PackageManager>,

    /// Directory with component template overrides, relative to the project root
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// Open the platform docs after `init`
    #[serde(default = "default_open_docs")]
    pub open_docs: bool,
}

fn default_open_docs() -> bool {
    true
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            package_manager: None,
            template_dir: None,
            open_docs: default_open_docs(),
        }
    }
}

impl ProjectConfig {
    /// Load `rc.yaml` from `project_root`, or defaults when it does not exist
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::fs("Error reading config at", &path, e))?;
        let mut config = Self::parse(&content)?;

        if let Some(dir) = &config.template_dir {
            if dir.is_relative() {
                config.template_dir = Some(project_root.join(dir));
            }
        }
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))
    }
}
