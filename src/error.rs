//! Error types for sidebar state persistence

use thiserror::Error;

/// Main error type for storage and configuration access
#[derive(Error, Debug)]
pub enum SidebarError {
    #[error("Persistent storage is unavailable")]
    StorageUnavailable,

    #[error("Failed to read '{key}' from storage: {reason}")]
    StorageRead { key: String, reason: String },

    #[error("Failed to write '{key}' to storage: {reason}")]
    StorageWrite { key: String, reason: String },

    #[error("Invalid sidebar configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for sidebar operations
pub type SidebarResult<T> = Result<T, SidebarError>;
