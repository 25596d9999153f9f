//! Error types for biodata.
//!
//! Validation failures are not errors in this sense: they are ordinary domain
//! values (see [`crate::validate::ValidationError`]) returned to the submitter.
//! Everything here is an operational failure that aborts the current request.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for biodata operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Replacing the backing file failed.
    #[error("failed to write record store at {path}: {source}")]
    StorageWrite {
        /// Path of the store file being replaced.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Server Errors ===
    /// The HTTP server could not bind or stopped with an error.
    #[error("server error on {addr}: {source}")]
    Server {
        /// Address the server was bound (or binding) to.
        addr: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for biodata operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a storage write error for the given store path.
    #[must_use]
    pub fn storage_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageWrite {
            path: path.into(),
            source,
        }
    }

    /// Check if this error came from persisting the record store.
    #[must_use]
    pub fn is_storage_write(&self) -> bool {
        matches!(self, Self::StorageWrite { .. } | Self::Json(_))
    }
}
