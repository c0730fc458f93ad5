//! Error types for drip scheduling

use chrono::NaiveDate;
use thiserror::Error;

/// Scheduling errors
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Group is not part of the current timeline
    #[error("Unknown group: {0}")]
    UnknownGroup(String),

    /// Item is not part of the current timeline
    #[error("Unknown timeline item: {0}")]
    UnknownItem(String),

    /// Group id string could not be parsed
    #[error("Invalid group id: {0}")]
    InvalidGroupId(String),

    /// Batch has no start date yet
    #[error("Batch start date is not set")]
    StartDateUnknown,

    /// Date lies before the batch start date
    #[error("Date {date} is before batch start {start}")]
    DateOutOfRange { date: NaiveDate, start: NaiveDate },
}

/// Result type for scheduling operations
pub type Result<T> = std::result::Result<T, ScheduleError>;
