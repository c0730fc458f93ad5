//! In-memory backend with JSON snapshots
//!
//! Holds one batch, its timeline items and a small course catalog. Used by
//! the CLI (snapshot files) and by tests, which can make individual writes
//! fail with [`MemoryStore::fail_on`].

use async_trait::async_trait;
use drip_core::types::{
    AssignmentId, Batch, BatchId, CourseId, CourseRecording, CourseRef, RecordingId,
    TimelineItem, TimelineItemDraft, TimelineItemId, TimelineItemUpdate,
};
use drip_core::{BatchLookup, CourseCatalog, DripError, Result, TimelineStore};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tokio::sync::RwLock;
use tracing::debug;

/// A course and its recordings, as stored in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEntry {
    #[serde(flatten)]
    pub course: CourseRef,
    #[serde(default)]
    pub recordings: Vec<CourseRecording>,
}

/// Serializable state of one batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub batch: Batch,
    #[serde(default)]
    pub items: Vec<TimelineItem>,
    #[serde(default)]
    pub courses: Vec<CourseEntry>,
    #[serde(default)]
    pub approved_assignments: Vec<AssignmentId>,
}

impl Snapshot {
    pub fn new(batch: Batch) -> Self {
        Self {
            batch,
            items: Vec::new(),
            courses: Vec::new(),
            approved_assignments: Vec::new(),
        }
    }

    /// Read a snapshot from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write the snapshot as pretty-printed JSON
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path.as_ref(), raw).await?;
        Ok(())
    }

    pub fn approved(&self) -> HashSet<AssignmentId> {
        self.approved_assignments.iter().cloned().collect()
    }
}

/// In-memory implementation of every storage trait
pub struct MemoryStore {
    state: RwLock<Snapshot>,
    failing: RwLock<HashSet<String>>,
}

impl MemoryStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
            failing: RwLock::new(HashSet::new()),
        }
    }

    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Snapshot::load(path).await?))
    }

    /// Current contents
    pub async fn snapshot(&self) -> Snapshot {
        self.state.read().await.clone()
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.state.read().await.save(path).await
    }

    /// Add or replace a catalog course
    pub async fn upsert_course(&self, entry: CourseEntry) {
        let mut state = self.state.write().await;
        match state
            .courses
            .iter_mut()
            .find(|known| known.course.id == entry.course.id)
        {
            Some(known) => *known = entry,
            None => state.courses.push(entry),
        }
    }

    /// Make writes touching `key` fail
    ///
    /// `key` is an item id for updates and deletes, a recording id for
    /// creates.
    pub async fn fail_on(&self, key: impl Into<String>) {
        self.failing.write().await.insert(key.into());
    }

    async fn check_failure(&self, key: &str) -> Result<()> {
        if self.failing.read().await.contains(key) {
            return Err(DripError::storage(format!("write rejected for {}", key)));
        }
        Ok(())
    }
}

#[async_trait]
impl TimelineStore for MemoryStore {
    async fn list_by_batch(&self, batch_id: &BatchId) -> Result<Vec<TimelineItem>> {
        let state = self.state.read().await;
        if &state.batch.id != batch_id {
            return Ok(Vec::new());
        }

        let mut items = state.items.clone();
        items.sort_by_key(TimelineItem::schedule_key);
        Ok(items)
    }

    async fn create_item(
        &self,
        batch_id: &BatchId,
        draft: TimelineItemDraft,
    ) -> Result<TimelineItem> {
        let key = draft
            .recording_id()
            .map_or_else(|| draft.title.clone(), ToString::to_string);
        self.check_failure(&key).await?;

        let mut state = self.state.write().await;
        if &state.batch.id != batch_id {
            return Err(DripError::not_found("Batch", batch_id.as_str()));
        }

        let item = TimelineItem::from_draft(TimelineItemId::generate(), draft);
        debug!("Created item {} ({})", item.id, item.title);
        state.items.push(item.clone());
        Ok(item)
    }

    async fn update_item(
        &self,
        id: &TimelineItemId,
        update: TimelineItemUpdate,
    ) -> Result<TimelineItem> {
        self.check_failure(id.as_str()).await?;

        let mut state = self.state.write().await;
        let item = state
            .items
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or_else(|| DripError::not_found("Timeline item", id.as_str()))?;

        item.apply(&update);
        Ok(item.clone())
    }

    async fn delete_item(&self, id: &TimelineItemId) -> Result<()> {
        self.check_failure(id.as_str()).await?;

        let mut state = self.state.write().await;
        let position = state
            .items
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| DripError::not_found("Timeline item", id.as_str()))?;

        state.items.remove(position);
        Ok(())
    }
}

#[async_trait]
impl BatchLookup for MemoryStore {
    async fn get_batch(&self, id: &BatchId) -> Result<Option<Batch>> {
        let state = self.state.read().await;
        Ok((&state.batch.id == id).then(|| state.batch.clone()))
    }
}

#[async_trait]
impl CourseCatalog for MemoryStore {
    async fn resolve_courses(
        &self,
        recording_ids: &[RecordingId],
    ) -> Result<HashMap<RecordingId, CourseRef>> {
        let wanted: HashSet<&RecordingId> = recording_ids.iter().collect();
        let state = self.state.read().await;

        let mut resolved = HashMap::new();
        for entry in &state.courses {
            for recording in &entry.recordings {
                if wanted.contains(&recording.recording_id) {
                    resolved
                        .entry(recording.recording_id.clone())
                        .or_insert_with(|| entry.course.clone());
                }
            }
        }
        Ok(resolved)
    }

    async fn get_course(&self, id: &CourseId) -> Result<Option<CourseRef>> {
        let state = self.state.read().await;
        Ok(state
            .courses
            .iter()
            .find(|entry| &entry.course.id == id)
            .map(|entry| entry.course.clone()))
    }

    async fn course_recordings(&self, id: &CourseId) -> Result<Vec<CourseRecording>> {
        let state = self.state.read().await;
        let entry = state
            .courses
            .iter()
            .find(|entry| &entry.course.id == id)
            .ok_or_else(|| DripError::not_found("Course", id.as_str()))?;

        let mut recordings = entry.recordings.clone();
        recordings.sort_by_key(|recording| (recording.module_order, recording.sequence_order));
        Ok(recordings)
    }
}
