//! Drip Planner - Timeline Sync
//!
//! Async glue between the pure scheduler in `drip-schedule` and the storage
//! traits in `drip-core`: loading a batch's timeline, importing courses,
//! persisting group reorders and deletions one item at a time.

mod error;
mod manager;
pub mod memory;
mod types;

// Public exports
pub use error::{Result, SyncError};
pub use manager::TimelineSync;
pub use memory::{CourseEntry, MemoryStore, Snapshot};
pub use types::{BulkOperation, BulkProgress, BulkWriteReport, ImportOptions, WriteFailure};
