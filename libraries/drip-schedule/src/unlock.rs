//! Student-facing unlock evaluation
//!
//! An item is reachable once its deploy date has arrived, unless an earlier
//! item (in schedule order) carries an assignment that has not been approved.
//! Gating is transitive: every item after an unapproved assignment stays
//! locked until that assignment is approved.

use crate::deploy::{deploy_date, DeployDate};
use chrono::NaiveDate;
use drip_core::types::{AssignmentId, TimelineItem, TimelineItemId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Unlock state of one item for one student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockStatus {
    Unlocked,
    /// Deploy date is still in the future
    Scheduled(NaiveDate),
    /// Date has arrived but an earlier assignment is unapproved
    AwaitingApproval(AssignmentId),
    /// Batch has no start date
    Unknown,
}

impl UnlockStatus {
    pub fn is_unlocked(&self) -> bool {
        matches!(self, Self::Unlocked)
    }
}

impl fmt::Display for UnlockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlocked => write!(f, "unlocked"),
            Self::Scheduled(date) => write!(f, "unlocks {}", date.format("%Y-%m-%d")),
            Self::AwaitingApproval(assignment) => write!(f, "awaiting approval of {}", assignment),
            Self::Unknown => write!(f, "-"),
        }
    }
}

/// Evaluate every item, returned in schedule order
pub fn evaluate_unlocks(
    items: &[TimelineItem],
    batch_start: Option<NaiveDate>,
    today: NaiveDate,
    approved: &HashSet<AssignmentId>,
) -> Vec<(TimelineItemId, UnlockStatus)> {
    let mut ordered: Vec<&TimelineItem> = items.iter().collect();
    ordered.sort_by_key(|item| item.schedule_key());

    let mut blocking: Option<&AssignmentId> = None;
    let mut statuses = Vec::with_capacity(ordered.len());

    for item in ordered {
        let status = match deploy_date(batch_start, item.drip_offset_days) {
            DeployDate::Unknown => UnlockStatus::Unknown,
            DeployDate::Scheduled(date) if date > today => UnlockStatus::Scheduled(date),
            DeployDate::Scheduled(_) => match blocking {
                Some(assignment) => UnlockStatus::AwaitingApproval(assignment.clone()),
                None => UnlockStatus::Unlocked,
            },
        };
        statuses.push((item.id.clone(), status));

        if blocking.is_none() {
            blocking = item
                .assignment_id
                .as_ref()
                .filter(|assignment| !approved.contains(*assignment));
        }
    }

    statuses
}
