//! Persistent key-value storage errors.

use thiserror::Error;

/// Key-value storage error variants.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum StorageError {
    #[error("storage I/O failed: {message}")]
    Io { message: String },

    #[error("failed to (de)serialize stored value: {message}")]
    Serialization { message: String },

    #[error("storage is unavailable: {message}")]
    Unavailable { message: String },
}

impl StorageError {
    /// Creates I/O error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Creates unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
