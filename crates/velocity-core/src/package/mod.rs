//! Package manager detection and dependency installation
//!
//! This module provides:
//! - Lockfile-based package manager detection (yarn, pnpm, npm)
//! - Install command construction per package manager
//! - An installer that runs one command per dependency batch

pub mod installer;
pub mod manager;

pub use installer::{CommandRunner, CommandStatus, Installer, ShellRunner};
pub use manager::PackageManager;
