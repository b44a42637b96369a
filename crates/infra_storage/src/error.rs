//! Storage error types

use std::path::PathBuf;
use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the storage adapters
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of strings
    #[error("Corrupt store file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Injected failure from a test store
    #[error("Write refused: {0}")]
    Refused(String),
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<StorageError> for PortError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Corrupt { .. } => PortError::corrupt(error.to_string()),
            StorageError::Io { .. } | StorageError::Refused(_) => {
                let message = error.to_string();
                PortError::unavailable(message, error)
            }
            StorageError::Serialization(_) => PortError::internal(error.to_string()),
        }
    }
}
