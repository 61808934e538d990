//! Package manager detection from lockfiles

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

/// Lockfiles in order of precedence
const LOCKFILES: &[(&str, PackageManager)] = &[
    ("yarn.lock", PackageManager::Yarn),
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("package-lock.json", PackageManager::Npm),
];

impl PackageManager {
    /// Detect the package manager managing `project_root`
    pub fn detect(project_root: &Path) -> Self {
        for (lockfile, manager) in LOCKFILES {
            if project_root.join(lockfile).exists() {
                return *manager;
            }
        }
        // No lockfile yet, new projects default to yarn
        PackageManager::Yarn
    }

    /// Binary name
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    fn install_verb(&self) -> &'static str {
        match self {
            PackageManager::Npm => "install",
            PackageManager::Yarn | PackageManager::Pnpm => "add",
        }
    }

    fn dev_flag(&self) -> &'static str {
        match self {
            PackageManager::Npm => "--save-dev",
            PackageManager::Yarn | PackageManager::Pnpm => "-D",
        }
    }

    /// Arguments installing every package in one invocation
    pub fn install_args(&self, packages: &[&str], dev: bool) -> Vec<String> {
        let mut args = Vec::with_capacity(packages.len() + 2);
        args.push(self.install_verb().to_string());
        args.extend(packages.iter().map(|p| p.to_string()));
        if dev {
            args.push(self.dev_flag().to_string());
        }
        args
    }

    /// Full command line, e.g. `yarn add zod axios -D`
    pub fn command_line(&self, packages: &[&str], dev: bool) -> String {
        let mut parts = vec![self.program().to_string()];
        parts.extend(self.install_args(packages, dev));
        parts.join(" ")
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}

impl FromStr for PackageManager {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "npm" => Ok(PackageManager::Npm),
            "yarn" => Ok(PackageManager::Yarn),
            "pnpm" => Ok(PackageManager::Pnpm),
            _ => Err(Error::Config(format!(
                "Unsupported package manager '{}'. Expected npm, yarn or pnpm.",
                s
            ))),
        }
    }
}
