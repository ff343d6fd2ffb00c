//! Error types for calendar parsing.

use thiserror::Error;

/// Result type for ICS operations.
pub type IcsResult<T> = Result<T, IcsError>;

/// Errors that can occur while reading an ICS file.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IcsError {
    /// The content is not valid iCalendar.
    #[error("failed to parse calendar: {0}")]
    Parse(String),

    /// The content parsed but holds no VCALENDAR.
    #[error("no VCALENDAR component found")]
    NoCalendar,
}
