//! Drip Planner - Timeline Scheduling
//!
//! Pure scheduling logic for a batch's content drip plan.
//!
//! This crate provides:
//! - Deploy dates (batch start + whole calendar days)
//! - Grouping by originating course, "Other Recordings", and "Live Sessions"
//! - Session-local group order that survives regroups
//! - Offset recompute after a group is dragged to a new position
//! - Import offset generation for bulk recording imports
//! - Flat list re-sequencing after drag-and-drop
//! - Assignment-gated unlock evaluation
//!
//! # Architecture
//!
//! `drip-schedule` performs no I/O:
//! - No dependency on a storage backend
//! - No wall-clock reads (callers pass `today`)
//! - Output never depends on hash-map iteration order
//!
//! Persistence of the updates it proposes is left to the caller
//! (see the `drip-sync` crate).
//!
//! # Example: Grouping and reordering
//!
//! ```rust
//! use drip_schedule::{GroupId, ScheduleConfig, Timeline};
//! use drip_core::types::{Batch, CourseRef, RecordingId, TimelineItem};
//! use chrono::NaiveDate;
//! use std::collections::HashMap;
//!
//! let batch = Batch::new("Spring cohort", NaiveDate::from_ymd_opt(2025, 3, 1));
//! let items = vec![
//!     TimelineItem::recording("Limits", "rec-1", 0, 0),
//!     TimelineItem::recording("Cells", "rec-2", 1, 1),
//! ];
//! let courses: HashMap<RecordingId, CourseRef> = [
//!     (RecordingId::new("rec-1"), CourseRef::new("calc", "Calculus")),
//!     (RecordingId::new("rec-2"), CourseRef::new("bio", "Biology")),
//! ]
//! .into_iter()
//! .collect();
//!
//! let mut timeline = Timeline::new(batch, items, courses, ScheduleConfig::default());
//! assert_eq!(timeline.groups()[0].label, "Calculus");
//!
//! // Drag Biology onto Calculus: Biology now comes first
//! let bio: GroupId = "course:bio".parse().unwrap();
//! let calc: GroupId = "course:calc".parse().unwrap();
//! let updates = timeline.move_group(&bio, &calc);
//! assert_eq!(updates.len(), 2);
//!
//! // Persist `updates`, then reflect the successful ones
//! timeline.apply_offset_updates(&updates);
//! assert_eq!(timeline.groups()[0].label, "Biology");
//! ```
//!
//! # Example: Import offsets
//!
//! ```rust
//! use drip_schedule::{generate_import_offsets, ImportCandidate};
//!
//! let picks = vec![
//!     ImportCandidate::new("rec-7", "Lesson 7"),
//!     ImportCandidate::new("rec-8", "Lesson 8"),
//!     ImportCandidate::new("rec-9", "Lesson 9"),
//! ];
//! let drafts = generate_import_offsets(&picks, 5, 2, 3);
//! let offsets: Vec<u32> = drafts.iter().map(|d| d.drip_offset_days).collect();
//! assert_eq!(offsets, vec![5, 7, 9]);
//! ```

mod deploy;
mod error;
pub mod events;
mod group_order;
mod grouping;
mod import;
mod recompute;
mod reindex;
mod timeline;
pub mod types;
mod unlock;

// Public exports
pub use deploy::{deploy_date, live_session_window, offset_for_date, DeployDate};
pub use error::{Result, ScheduleError};
pub use events::TimelineEvent;
pub use group_order::GroupOrder;
pub use grouping::{build_groups, LIVE_SESSIONS_LABEL, UNCATEGORIZED_LABEL};
pub use import::{default_base_offset, generate_import_offsets};
pub use recompute::recompute_offsets;
pub use reindex::{assign_sequence, reindex};
pub use timeline::Timeline;
pub use types::{Group, GroupIcon, GroupId, ImportCandidate, ItemOffsetUpdate, ScheduleConfig};
pub use unlock::{evaluate_unlocks, UnlockStatus};
