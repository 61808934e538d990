//! Error types for scaffolding operations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the generate and init pipelines
///
/// Every variant names the resource that failed so the binary can print a
/// single red line before exiting.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or empty command arguments
    #[error("{0}")]
    UserInput(String),

    /// Platform id with no configuration
    #[error("Unsupported platform '{0}'. Supported platforms are 'react' and 'react-native'.")]
    UnsupportedPlatform(String),

    /// Directory creation, write, move or read failure
    #[error("{action} {}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Folder or file download failure
    #[error("Failed to download {resource}: {message}")]
    Network { resource: String, message: String },

    /// Package manager could not be spawned or exited non-zero
    #[error("Failed to install packages with {manager} ({command}): {reason}")]
    Install {
        manager: String,
        command: String,
        reason: String,
    },

    /// Invalid rc.yaml or repository locator
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized Result type for scaffolding operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn fs(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn network(resource: impl Into<String>, message: impl ToString) -> Self {
        Self::Network {
            resource: resource.into(),
            message: message.to_string(),
        }
    }
}
