//! Storage boundary for timeline data
//!
//! The scheduler never owns persistence. These traits describe the CRUD and
//! lookup calls it makes so hosted backends and the in-memory store used by
//! tests can be swapped freely.

use crate::error::Result;
use crate::types::{
    Batch, BatchId, CourseId, CourseRecording, CourseRef, RecordingId, TimelineItem,
    TimelineItemDraft, TimelineItemId, TimelineItemUpdate,
};
use async_trait::async_trait;
use std::collections::HashMap;

/// Timeline item persistence
///
/// Each call is an independent write; implementations give no transaction
/// guarantee across calls.
#[async_trait]
pub trait TimelineStore: Send + Sync {
    /// List all items scheduled for a batch
    async fn list_by_batch(&self, batch_id: &BatchId) -> Result<Vec<TimelineItem>>;

    /// Persist a new item and return it with its assigned id
    async fn create_item(&self, batch_id: &BatchId, draft: TimelineItemDraft)
        -> Result<TimelineItem>;

    /// Apply a partial update
    async fn update_item(
        &self,
        id: &TimelineItemId,
        update: TimelineItemUpdate,
    ) -> Result<TimelineItem>;

    /// Delete an item
    async fn delete_item(&self, id: &TimelineItemId) -> Result<()>;
}

/// Read-only batch lookup
#[async_trait]
pub trait BatchLookup: Send + Sync {
    /// Get batch by ID
    async fn get_batch(&self, id: &BatchId) -> Result<Option<Batch>>;
}

/// Read-only course catalog
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    /// Resolve the owning course of each recording
    ///
    /// Recordings without a known course are simply absent from the map.
    async fn resolve_courses(
        &self,
        recording_ids: &[RecordingId],
    ) -> Result<HashMap<RecordingId, CourseRef>>;

    /// Get a course by ID
    async fn get_course(&self, id: &CourseId) -> Result<Option<CourseRef>>;

    /// Recordings of a course in module order, then lesson order
    async fn course_recordings(&self, id: &CourseId) -> Result<Vec<CourseRecording>>;
}
