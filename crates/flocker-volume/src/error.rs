//! Errors raised by the volume service.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or creating the volume configuration.
#[derive(Debug, Error)]
pub enum VolumeError {
    /// The config file or its directory could not be read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The config file exists but is not a valid volume config.
    #[error("invalid volume config {}: {source}", path.display())]
    InvalidConfig {
        /// Offending file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

impl VolumeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for volume results.
pub type Result<T, E = VolumeError> = std::result::Result<T, E>;
