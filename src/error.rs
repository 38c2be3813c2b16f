//! Error types for feature-overlay

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the codec, patch storage, and merge pipelines
#[derive(Debug, Error)]
pub enum Error {
    /// Feature XML could not be parsed
    #[error("malformed feature XML: {0}")]
    Xml(String),

    /// Patch file is not a valid patch document
    #[error("malformed patch file: {0}")]
    PatchFormat(String),

    /// Filesystem operation failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path the operation was acting on
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is missing or invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// No feature with the requested name in the effective list
    #[error("no feature named {0}")]
    UnknownFeature(String),

    /// Value could not be serialized
    #[error("serialization error: {0}")]
    Serialize(String),
}

impl Error {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;
