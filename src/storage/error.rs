//! Error types for the table store layer

use std::fmt;
use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Request never got a response
    #[error("Request failed: {0}")]
    Request(String),

    /// Store answered with a non-success status
    #[error("Table store rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Write call larger than the store accepts
    #[error("Batch of {size} records exceeds the limit of {limit} per call")]
    BatchTooLarge { size: usize, limit: usize },

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic error wrapper
    #[error("Storage error: {0}")]
    Other(#[from] anyhow::Error),
}

impl StorageError {
    /// Create a serialization error
    pub fn serialization<E: fmt::Display>(err: E) -> Self {
        Self::Serialization(err.to_string())
    }

    /// Create a request error
    pub fn request<E: fmt::Display>(err: E) -> Self {
        Self::Request(err.to_string())
    }

    /// Create a not found error
    pub fn not_found<E: fmt::Display>(item: E) -> Self {
        Self::NotFound(item.to_string())
    }

    /// Create a configuration error
    pub fn configuration<E: fmt::Display>(msg: E) -> Self {
        Self::Configuration(msg.to_string())
    }

    /// Rate limiting is the only condition a transport may retry
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Rejected { status: 429, .. })
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err)
    }
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        Self::request(err)
    }
}
