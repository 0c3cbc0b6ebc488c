//! Error types for wayfarer-core

use thiserror::Error;

use crate::capture::Permission;

/// Result type alias using wayfarer-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in wayfarer-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// A platform capability was refused by the user or the OS
    #[error("Permission denied: {0}")]
    PermissionDenied(Permission),

    /// The image capture collaborator failed
    #[error("Capture error: {0}")]
    Capture(String),

    /// Current position or reverse geocoding could not be resolved
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    /// The entry list could not be written back to storage
    #[error("Could not save entries: {0}")]
    StorageWrite(String),

    /// A local notification could not be shown
    #[error("Notification error: {0}")]
    Notification(String),

    /// Key-value storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored blob does not match the entry schema
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Positional removal past the end of the list
    #[error("Index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    /// Entry not found
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// Operation not allowed in the current flow state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
