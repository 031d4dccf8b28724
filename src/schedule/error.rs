//! Errors raised while interpreting schedule data

use thiserror::Error;

/// Result type for schedule parsing
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Schedule data that cannot be interpreted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Date string is not in `yyyy-mm-dd` form
    #[error("Malformed date '{0}': expected yyyy-mm-dd")]
    MalformedDate(String),

    /// Date string is well-formed but names a day that does not exist
    #[error("Invalid calendar date '{0}'")]
    InvalidDate(String),

    /// Weekday selector is not one of the seven recognized names
    #[error("Unexpected day of week: {0}")]
    UnknownWeekday(String),
}
