//! Error types for sitepush
//!
//! Uses `thiserror` for library errors. Every variant is fatal to the run that
//! raised it; commands applied before the failure are not rolled back.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::DeployerError;
use crate::domain::value_objects::PathError;

/// Result type alias for sitepush operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Main error type for sitepush operations
#[derive(Error, Debug)]
pub enum DeployError {
    /// A tree root does not exist
    #[error("{role} directory not found: {path}")]
    DirectoryNotFound { role: &'static str, path: PathBuf },

    /// A tree root exists but is not a directory
    #[error("{role} must be a directory: {path}")]
    NotADirectory { role: &'static str, path: PathBuf },

    /// Filesystem error while scanning or reading
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Entry path cannot be expressed relative to its root
    #[error("invalid path: {0}")]
    InvalidPath(#[from] PathError),

    /// Content transformer rejected a source file
    #[error("failed to minify {path}: {message}")]
    Transform { path: PathBuf, message: String },

    /// A deployer failed to apply a command
    #[error("{name} deployer failed: {source}")]
    Deployer {
        name: &'static str,
        #[source]
        source: DeployerError,
    },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// A required configuration key has no value
    #[error("missing configuration value '{key}'")]
    MissingSetting { key: String },

    /// Operation was declined at an interactive prompt
    #[error("aborted by user")]
    Aborted,
}

impl DeployError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn deployer(name: &'static str, source: DeployerError) -> Self {
        Self::Deployer { name, source }
    }

    /// Whether the error was raised before any command could be emitted
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DirectoryNotFound { .. }
                | Self::NotADirectory { .. }
                | Self::Config { .. }
                | Self::MissingSetting { .. }
        )
    }
}
