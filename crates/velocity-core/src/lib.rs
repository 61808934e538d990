//! Velocity Core - Shared library for the `rc` scaffolding CLI
//!
//! This library scaffolds React and React Native projects. It is organized
//! into layers:
//!
//! - **Layer 1: Core Operations** - filesystem helpers, component templates,
//!   starter template fetching, package manager detection and installation
//! - **Layer 2: Pipelines** - [`generate()`] for a single component and
//!   [`init()`] for a whole starter project
//!
//! Every operation takes the project root explicitly and returns a
//! [`Result`]; deciding the process exit code is left to the binary.
//!
//! # Example Usage
//!
//! ```ignore
//! use velocity_core::{generate, ComponentScaffoldRequest, Platform, TemplateEngine};
//!
//! let request = ComponentScaffoldRequest::new("components", "Card", Platform::Web);
//! let files = generate(&project_root, &request, &TemplateEngine::builtin()).await?;
//! ```

pub mod config;
pub mod error;
pub mod fs;
pub mod generate;
pub mod init;
pub mod output;
pub mod package;
pub mod platform;
pub mod product;
pub mod templates;

// Re-export main types for convenience
pub use config::ProjectConfig;
pub use error::{Error, Result};
pub use generate::{generate, ComponentScaffoldRequest, GeneratedFileSet};
pub use init::{init, InitOptions, InitOutcome};
pub use package::{Installer, PackageManager, ShellRunner};
pub use platform::{Platform, PlatformConfig};
pub use product::ProductConfig;
pub use templates::{AssetManifest, AssetManifestEntry, TemplateEngine, TemplateFetcher, TemplateSource};
