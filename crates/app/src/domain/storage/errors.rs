//! Storage errors.

use std::io;

use thiserror::Error;

/// Errors raised by key-value storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage io error")]
    Io(#[from] io::Error),

    /// Stored contents are not valid JSON.
    #[error("storage contents could not be encoded or decoded")]
    Serialization(#[from] serde_json::Error),

    /// A writer panicked while holding the storage lock.
    #[error("storage lock poisoned: {0}")]
    Poisoned(String),
}
