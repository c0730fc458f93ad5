//! Drip Planner Core
//!
//! Domain types, storage traits, and error handling shared by the drip
//! scheduling crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Batch`, `TimelineItem`, `CourseRef`, and their ids
//! - **Storage Traits**: `TimelineStore`, `BatchLookup`, `CourseCatalog`
//! - **Error Handling**: Unified `DripError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use drip_core::types::{Batch, TimelineItem, TimelineItemKind};
//! use chrono::NaiveDate;
//!
//! let batch = Batch::new("Spring cohort", NaiveDate::from_ymd_opt(2025, 3, 1));
//! assert!(batch.can_edit_start_date());
//!
//! let item = TimelineItem::recording("Welcome", "rec-1", 0, 0);
//! assert_eq!(item.kind(), TimelineItemKind::Recording);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{DripError, Result};
pub use storage::{BatchLookup, CourseCatalog, TimelineStore};

pub use types::{
    AssignmentId, Batch, BatchId, BatchStatus, CourseId, CourseRecording, CourseRef, RecordingId,
    TimelineContent, TimelineItem, TimelineItemDraft, TimelineItemId, TimelineItemKind,
    TimelineItemUpdate,
};
