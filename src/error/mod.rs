use std::fmt::Display;
use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

use crate::schedule::ScheduleError;
use crate::storage::StorageError;

/// Fatal errors that stop an expansion run
#[derive(Error, Debug)]
pub enum JobError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Data integrity error in \"{order}\": {message}")]
    DataIntegrity {
        code: u16,
        message: String,
        order: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Storage error: {message}")]
    Storage {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] {message}")]
    Other {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl JobError {
    /// Create a configuration error with default code
    pub fn config(message: impl Into<String>) -> Self {
        Self::config_with_code(ErrorCode::CONFIG_GENERIC, message)
    }

    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an unreadable schedule cell, naming the order it came from
    pub fn data_integrity(order: impl Into<String>, err: ScheduleError) -> Self {
        let code = match &err {
            ScheduleError::UnknownWeekday(_) => ErrorCode::DATA_UNKNOWN_WEEKDAY,
            ScheduleError::MalformedDate(_) => ErrorCode::DATA_MALFORMED_DATE,
            ScheduleError::InvalidDate(_) => ErrorCode::DATA_INVALID_DATE,
        };
        Self::DataIntegrity {
            code,
            message: err.to_string(),
            order: order.into(),
            source: Some(Box::new(err)),
        }
    }

    /// Create a storage error with default code
    pub fn storage(message: impl Into<String>) -> Self {
        Self::storage_with_code(ErrorCode::STORAGE_GENERIC, message)
    }

    /// Create a storage error with specific code
    pub fn storage_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Storage {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a generic other error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            code: ErrorCode::OTHER_GENERIC,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::DataIntegrity { source: src, .. }
            | Self::Storage { source: src, .. }
            | Self::Other { source: src, .. } => {
                *src = Some(source.into());
            }
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::DataIntegrity { message, .. }
            | Self::Storage { message, .. }
            | Self::Other { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
        }
        self
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::DataIntegrity { .. } => 3,
            Self::Storage { .. } => 4,
            Self::Other { .. } => 1,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::DataIntegrity { code, .. }
            | Self::Storage { code, .. }
            | Self::Other { code, .. } => *code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, .. } => format!("Configuration problem: {}", message),
            Self::DataIntegrity { message, order, .. } => {
                format!("Order \"{}\" has unusable data: {}", order, message)
            }
            Self::Storage { message, .. } => format!("Storage error: {}", message),
            Self::Other { message, .. } => message.clone(),
        }
    }

    /// Get a developer-friendly error message with full chain
    pub fn developer_message(&self) -> String {
        let mut out = format!("{}", self);
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            out.push_str(&format!("\n  caused by: {}", cause));
            source = std::error::Error::source(cause);
        }
        out
    }
}

impl From<StorageError> for JobError {
    fn from(err: StorageError) -> Self {
        let code = match &err {
            StorageError::Io(_) => ErrorCode::STORAGE_IO_ERROR,
            StorageError::Serialization(_) => ErrorCode::STORAGE_SERIALIZATION_ERROR,
            StorageError::Request(_) => ErrorCode::STORAGE_REQUEST_FAILED,
            StorageError::Rejected { .. } => ErrorCode::STORAGE_REJECTED,
            StorageError::BatchTooLarge { .. } => ErrorCode::STORAGE_BATCH_TOO_LARGE,
            StorageError::NotFound(_) => ErrorCode::STORAGE_NOT_FOUND,
            StorageError::Configuration(_) => ErrorCode::STORAGE_CONFIGURATION,
            StorageError::Other(_) => ErrorCode::STORAGE_GENERIC,
        };

        JobError::storage_with_code(code, err.to_string()).with_source(err)
    }
}

/// Type alias for Results using JobError
pub type Result<T> = std::result::Result<T, JobError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_error_construction() {
        let err = JobError::config("batch_size must be between 1 and 50");
        assert!(matches!(err, JobError::Config { .. }));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.code(), ErrorCode::CONFIG_GENERIC);

        let err = JobError::storage("write failed");
        assert_eq!(err.exit_code(), 4);
        assert_eq!(err.code(), ErrorCode::STORAGE_GENERIC);

        let err = JobError::other("unexpected");
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.code(), ErrorCode::OTHER_GENERIC);
    }

    #[test]
    fn test_data_integrity_codes() {
        let err = JobError::data_integrity(
            "Lunch",
            ScheduleError::UnknownWeekday("Funday".to_string()),
        );
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.code(), ErrorCode::DATA_UNKNOWN_WEEKDAY);
        assert_eq!(
            err.to_string(),
            "[E2001] Data integrity error in \"Lunch\": Unexpected day of week: Funday"
        );
        assert!(err.user_message().contains("Lunch"));

        let err = JobError::data_integrity(
            "Lunch",
            ScheduleError::MalformedDate("3/1/24".to_string()),
        );
        assert_eq!(err.code(), ErrorCode::DATA_MALFORMED_DATE);
    }

    #[test]
    fn test_error_with_context() {
        let err = JobError::config("Config error").with_context("recurring-orders.toml");
        assert_eq!(
            err.to_string(),
            "[E1000] Configuration error: Config error: recurring-orders.toml"
        );
    }

    #[test]
    fn test_storage_error_conversion_keeps_source() {
        let err: JobError = StorageError::BatchTooLarge { size: 51, limit: 50 }.into();
        assert_eq!(err.code(), ErrorCode::STORAGE_BATCH_TOO_LARGE);
        assert_eq!(err.exit_code(), 4);
        assert!(err.developer_message().contains("caused by"));
    }
}
