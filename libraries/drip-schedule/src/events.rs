//! Timeline Events
//!
//! Event-based change notification for views sharing a timeline. Events are
//! queued on every mutation and drained by the consumer:
//! - Regroups (any change to items or course resolution)
//! - Group order changes (reconcile or drag reorder)
//! - Offset recomputes after a group reorder
//! - Items added, updated, or removed

use crate::types::GroupId;
use drip_core::types::TimelineItemId;
use serde::{Deserialize, Serialize};

/// Events emitted by a [`crate::Timeline`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineEvent {
    /// Groups were rebuilt from scratch
    GroupsRebuilt {
        /// Number of non-empty groups
        group_count: usize,
        /// Number of items across all groups
        item_count: usize,
    },

    /// Session group order changed
    GroupOrderChanged {
        /// New order
        order: Vec<GroupId>,
    },

    /// Offsets were recomputed after a group reorder
    OffsetsRecomputed {
        /// Items whose offset would change
        changed: usize,
    },

    /// Items were added to the timeline
    ItemsAdded {
        item_ids: Vec<TimelineItemId>,
    },

    /// Items were updated in place
    ItemsUpdated {
        item_ids: Vec<TimelineItemId>,
    },

    /// Items were removed from the timeline
    ItemsRemoved {
        item_ids: Vec<TimelineItemId>,
    },
}
