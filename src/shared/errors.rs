//! Strict error handling with CommandError enum
//!
//! All command failures are typed and serializable for IPC communication
//! with the frontend.

use serde::Serialize;
use thiserror::Error;

/// Command execution errors
///
/// Every variant serializes as `{ type, message }` so the frontend can
/// branch on the failure class.
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum CommandError {
    /// System I/O error (file operations, database, etc.)
    #[error("System I/O error: {0}")]
    SystemIO(String),

    /// Invalid input or parameter (validation failures)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Required feature is missing or unconfigured (e.g. no API key)
    #[error("Feature missing: {0}")]
    FeatureMissing(String),

    /// Snapshot storage error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Clipboard operation error
    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    /// Window operation error
    #[error("Window error: {0}")]
    WindowError(String),

    /// Network/API error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Unknown/unexpected error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::SystemIO(err.to_string())
    }
}

impl From<reqwest::Error> for CommandError {
    fn from(err: reqwest::Error) -> Self {
        CommandError::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        CommandError::InvalidInput(format!("JSON error: {}", err))
    }
}

// Helper type alias for command results
pub type CommandResult<T> = Result<T, CommandError>;
