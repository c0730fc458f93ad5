/// Batch (cohort) domain types
use crate::types::BatchId;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl BatchStatus {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A cohort of students following the same drip schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Unique batch identifier
    pub id: BatchId,

    /// Display name
    pub name: String,

    /// Day 0 of the drip schedule; `None` until the batch is configured
    pub start_date: Option<NaiveDate>,

    /// IANA timezone name the batch's dates are expressed in
    pub timezone: String,

    /// Default start time for live sessions, batch-local
    pub default_session_time: NaiveTime,

    /// Lifecycle status
    #[serde(default)]
    pub status: BatchStatus,
}

impl Batch {
    /// Create a not-yet-started batch
    pub fn new(name: impl Into<String>, start_date: Option<NaiveDate>) -> Self {
        Self {
            id: BatchId::generate(),
            name: name.into(),
            start_date,
            timezone: "UTC".to_string(),
            default_session_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
            status: BatchStatus::NotStarted,
        }
    }

    /// Start date can only change before the batch begins
    pub fn can_edit_start_date(&self) -> bool {
        self.status == BatchStatus::NotStarted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_date_editable_only_before_start() {
        let mut batch = Batch::new("Spring cohort", NaiveDate::from_ymd_opt(2025, 3, 1));
        assert!(batch.can_edit_start_date());

        batch.status = BatchStatus::InProgress;
        assert!(!batch.can_edit_start_date());

        batch.status = BatchStatus::Completed;
        assert!(!batch.can_edit_start_date());
    }

    #[test]
    fn status_defaults_when_missing() {
        let json = r#"{
            "id": "b1",
            "name": "Cohort",
            "start_date": "2025-03-01",
            "timezone": "Asia/Kolkata",
            "default_session_time": "19:30:00"
        }"#;
        let batch: Batch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.status, BatchStatus::NotStarted);
        assert_eq!(batch.start_date, NaiveDate::from_ymd_opt(2025, 3, 1));
    }
}
