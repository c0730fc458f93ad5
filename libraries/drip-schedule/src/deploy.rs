//! Deploy-date arithmetic
//!
//! A timeline item unlocks `drip_offset_days` calendar days after the batch
//! start date. Dates are already batch-local, so no timezone conversion
//! happens here.

use chrono::{Days, Duration, NaiveDate, NaiveDateTime};
use drip_core::types::Batch;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar date an item unlocks on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployDate {
    Scheduled(NaiveDate),
    /// Batch start date is not configured (or the date overflows)
    Unknown,
}

impl DeployDate {
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            Self::Scheduled(date) => Some(date),
            Self::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, Self::Scheduled(_))
    }
}

impl fmt::Display for DeployDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduled(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Unknown => write!(f, "-"),
        }
    }
}

/// Resolve the unlock date of an offset
pub fn deploy_date(batch_start: Option<NaiveDate>, offset_days: u32) -> DeployDate {
    batch_start
        .and_then(|start| start.checked_add_days(Days::new(u64::from(offset_days))))
        .map_or(DeployDate::Unknown, DeployDate::Scheduled)
}

/// Offset that lands on `date`, `None` when `date` precedes the start
pub fn offset_for_date(batch_start: NaiveDate, date: NaiveDate) -> Option<u32> {
    let days = date.signed_duration_since(batch_start).num_days();
    u32::try_from(days).ok()
}

/// Start and end of a live session held on an offset day
///
/// The session starts at the batch's default session time.
pub fn live_session_window(
    batch: &Batch,
    offset_days: u32,
    duration_minutes: u32,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let date = deploy_date(batch.start_date, offset_days).date()?;
    let start = date.and_time(batch.default_session_time);
    let end = start.checked_add_signed(Duration::minutes(i64::from(duration_minutes)))?;
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn zero_offset_is_start_date() {
        let start = date(2025, 3, 1);
        assert_eq!(deploy_date(Some(start), 0), DeployDate::Scheduled(start));
    }

    #[test]
    fn offset_crosses_month_and_leap_day() {
        assert_eq!(
            deploy_date(Some(date(2024, 2, 28)), 2),
            DeployDate::Scheduled(date(2024, 3, 1))
        );
        assert_eq!(
            deploy_date(Some(date(2025, 1, 30)), 30),
            DeployDate::Scheduled(date(2025, 3, 1))
        );
    }

    #[test]
    fn missing_start_is_unknown_placeholder() {
        let resolved = deploy_date(None, 5);
        assert_eq!(resolved, DeployDate::Unknown);
        assert_eq!(resolved.to_string(), "-");
        assert_eq!(resolved.date(), None);
    }

    #[test]
    fn overflow_is_unknown() {
        assert_eq!(deploy_date(Some(NaiveDate::MAX), 1), DeployDate::Unknown);
    }

    #[test]
    fn display_is_iso_date() {
        assert_eq!(
            deploy_date(Some(date(2025, 3, 1)), 9).to_string(),
            "2025-03-10"
        );
    }

    #[test]
    fn offset_for_date_round_trips_and_rejects_past() {
        let start = date(2025, 3, 1);
        assert_eq!(offset_for_date(start, date(2025, 3, 15)), Some(14));
        assert_eq!(offset_for_date(start, start), Some(0));
        assert_eq!(offset_for_date(start, date(2025, 2, 28)), None);
    }

    #[test]
    fn live_session_uses_default_session_time() {
        let mut batch = Batch::new("Evening cohort", Some(date(2025, 3, 1)));
        batch.default_session_time = NaiveTime::from_hms_opt(19, 30, 0).unwrap();

        let (start, end) = live_session_window(&batch, 2, 90).unwrap();
        assert_eq!(start, date(2025, 3, 3).and_hms_opt(19, 30, 0).unwrap());
        assert_eq!(end, date(2025, 3, 3).and_hms_opt(21, 0, 0).unwrap());

        batch.start_date = None;
        assert_eq!(live_session_window(&batch, 2, 90), None);
    }
}
