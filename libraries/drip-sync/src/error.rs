use drip_core::DripError;
use drip_schedule::ScheduleError;
use thiserror::Error;

/// Errors that can occur while synchronizing a timeline with its store
#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Core(#[from] DripError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("Batch not found: {0}")]
    BatchNotFound(String),

    #[error("Course not found: {0}")]
    CourseNotFound(String),
}

pub type Result<T> = std::result::Result<T, SyncError>;
