//! Platform table: which starter repository, dependencies and docs belong to
//! the web (React) and mobile (React Native) flavors

use crate::error::{Error, Result};
use std::fmt;

/// Target application flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// React
    Web,
    /// React Native
    Mobile,
}

impl Platform {
    /// Platform id as used on the command line
    pub fn id(&self) -> &'static str {
        match self {
            Platform::Web => "react",
            Platform::Mobile => "react-native",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Web => "React",
            Platform::Mobile => "React Native",
        }
    }

    /// Resolve a platform id. Unknown ids yield `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "react" => Some(Platform::Web),
            "react-native" => Some(Platform::Mobile),
            _ => None,
        }
    }

    /// Resolve a platform id, rejecting unknown ids
    pub fn parse(id: &str) -> Result<Self> {
        Self::from_id(id).ok_or_else(|| Error::UnsupportedPlatform(id.to_string()))
    }

    /// Static configuration for this platform
    pub fn config(&self) -> PlatformConfig {
        match self {
            Platform::Mobile => PlatformConfig {
                platform: *self,
                repo_locator: "github:rvelocity/react-native-template",
                raw_base_url: "https://raw.githubusercontent.com/rvelocity/react-native-template/main",
                dependencies: MOBILE_DEPENDENCIES,
                dev_dependencies: MOBILE_DEV_DEPENDENCIES,
                docs_url: "https://github.com/rvelocity/cli/blob/main/docs/REACTNATIVE_INIT.md",
            },
            Platform::Web => PlatformConfig {
                platform: *self,
                repo_locator: "github:rvelocity/react-template",
                raw_base_url: "https://raw.githubusercontent.com/rvelocity/react-template/main",
                dependencies: WEB_DEPENDENCIES,
                dev_dependencies: WEB_DEV_DEPENDENCIES,
                docs_url: "https://github.com/rvelocity/cli/blob/main/docs/REACT_INIT.md",
            },
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Per-platform starter project configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    pub platform: Platform,
    /// `github:<owner>/<repo>` locator of the starter repository
    pub repo_locator: &'static str,
    /// Base URL for raw file downloads
    pub raw_base_url: &'static str,
    pub dependencies: &'static [&'static str],
    pub dev_dependencies: &'static [&'static str],
    pub docs_url: &'static str,
}

impl PlatformConfig {
    /// Look up the configuration for a platform id
    pub fn lookup(id: &str) -> Option<Self> {
        Platform::from_id(id).map(|p| p.config())
    }

    pub fn repo(&self) -> Result<RepoLocator> {
        RepoLocator::parse(self.repo_locator)
    }
}

/// Parsed `github:<owner>/<repo>[/<subdir>][#<ref>]` locator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoLocator {
    pub owner: String,
    pub repo: String,
    /// Path inside the repository, empty for the repository root
    pub subdir: String,
    /// Branch name
    pub git_ref: String,
}

impl RepoLocator {
    pub const DEFAULT_REF: &'static str = "main";

    pub fn parse(locator: &str) -> Result<Self> {
        let invalid = || Error::Config(format!("Invalid repository locator: {}", locator));

        let rest = locator.strip_prefix("github:").ok_or_else(invalid)?;
        let (path, git_ref) = match rest.split_once('#') {
            Some((path, r)) if !r.is_empty() => (path, r),
            Some(_) => return Err(invalid()),
            None => (rest, Self::DEFAULT_REF),
        };

        let mut parts = path.split('/').filter(|s| !s.is_empty());
        let owner = parts.next().ok_or_else(invalid)?;
        let repo = parts.next().ok_or_else(invalid)?;
        let subdir = parts.collect::<Vec<_>>().join("/");

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            subdir,
            git_ref: git_ref.to_string(),
        })
    }

    /// Locator for a path inside this repository
    pub fn join(&self, path: &str) -> Self {
        let path = path.trim_matches('/');
        let subdir = match (self.subdir.is_empty(), path.is_empty()) {
            (true, _) => path.to_string(),
            (false, true) => self.subdir.clone(),
            (false, false) => format!("{}/{}", self.subdir, path),
        };
        Self {
            subdir,
            ..self.clone()
        }
    }
}

impl fmt::Display for RepoLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "github:{}/{}", self.owner, self.repo)?;
        if !self.subdir.is_empty() {
            write!(f, "/{}", self.subdir)?;
        }
        if self.git_ref != Self::DEFAULT_REF {
            write!(f, "#{}", self.git_ref)?;
        }
        Ok(())
    }
}

const MOBILE_DEPENDENCIES: &[&str] = &[
    "@react-native-community/netinfo",
    "react-native-unistyles",
    "@tanstack/react-query",
    "@tanstack/react-query-persist-client",
    "@tanstack/query-sync-storage-persister",
    "react-native-mmkv",
    "zustand",
    "axios",
    "react-native-svg",
    "react-hook-form",
    "@hookform/resolvers",
    "zod",
    "i18next",
    "react-i18next",
    "react-native-vector-icons",
    "@react-navigation/native",
    "react-native-screens",
    "react-native-safe-area-context",
    "@react-navigation/native-stack",
    "date-fns",
    "lottie-react-native",
    "react-native-gesture-handler",
    "react-native-reanimated",
    "react-native-linear-gradient",
    "@shopify/flash-list",
];

const MOBILE_DEV_DEPENDENCIES: &[&str] = &[
    "babel-plugin-module-resolver",
    "react-native-svg-transformer",
    "@types/react-native-vector-icons",
    "@storybook/addon-ondevice-actions",
    "@storybook/addon-ondevice-backgrounds",
    "@storybook/addon-ondevice-controls",
    "@storybook/addon-ondevice-notes",
    "@storybook/react-native",
    "@gorhom/bottom-sheet@^4.6.4",
    "@react-native-async-storage/async-storage",
    "@react-native-community/slider",
    "@react-native-community/datetimepicker",
];

const WEB_DEPENDENCIES: &[&str] = &[
    "@tanstack/react-query",
    "@tanstack/react-query-persist-client",
    "@tanstack/query-sync-storage-persister",
    "zustand",
    "axios",
    "react-hook-form",
    "@hookform/resolvers",
    "zod",
    "i18next",
    "react-i18next",
    "date-fns",
];

const WEB_DEV_DEPENDENCIES: &[&str] = &[];
