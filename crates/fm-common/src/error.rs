//! Error types for Fleet Metrics.

use thiserror::Error;

/// Result type alias for Fleet Metrics operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Fleet Metrics.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid configuration: {0}")]
    ConfigValidation(String),

    // Snapshot/store errors (20-29)
    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("snapshot schema version {found} is not compatible (expected {expected})")]
    SnapshotSchema { found: String, expected: String },

    #[error("vehicle {query} not found")]
    VehicleNotFound { query: String },

    // Analysis errors (30-39)
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::ConfigValidation(_) => 11,
            Error::Snapshot(_) => 20,
            Error::SnapshotSchema { .. } => 21,
            Error::VehicleNotFound { .. } => 22,
            Error::InsufficientData(_) => 30,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }
}
