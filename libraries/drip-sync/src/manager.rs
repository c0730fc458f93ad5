use crate::{
    error::Result, BulkOperation, BulkProgress, BulkWriteReport, ImportOptions, SyncError,
    WriteFailure,
};
use drip_core::types::{
    BatchId, CourseId, CourseRef, RecordingId, TimelineItem, TimelineItemDraft, TimelineItemId,
    TimelineItemUpdate,
};
use drip_core::{BatchLookup, CourseCatalog, DripError, TimelineStore};
use drip_schedule::{GroupId, ImportCandidate, ScheduleConfig, ScheduleError, Timeline};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Keeps an in-memory [`Timeline`] and its backing store in step
///
/// Writes are issued one item at a time on the caller's task. A failed write
/// is logged and reported; the writes before and after it are kept. Only
/// writes the store accepted are reflected in the timeline.
pub struct TimelineSync {
    store: Arc<dyn TimelineStore>,
    batches: Arc<dyn BatchLookup>,
    catalog: Arc<dyn CourseCatalog>,
    config: ScheduleConfig,
    progress_tx: Option<mpsc::Sender<BulkProgress>>,
}

impl TimelineSync {
    pub fn new(
        store: Arc<dyn TimelineStore>,
        batches: Arc<dyn BatchLookup>,
        catalog: Arc<dyn CourseCatalog>,
        config: ScheduleConfig,
    ) -> Self {
        Self {
            store,
            batches,
            catalog,
            config,
            progress_tx: None,
        }
    }

    /// Use one backend for items, batches and courses
    pub fn with_backend<B>(backend: Arc<B>, config: ScheduleConfig) -> Self
    where
        B: TimelineStore + BatchLookup + CourseCatalog + 'static,
    {
        Self::new(backend.clone(), backend.clone(), backend, config)
    }

    /// Stream progress of bulk writes
    #[must_use]
    pub fn with_progress(mut self, progress_tx: mpsc::Sender<BulkProgress>) -> Self {
        self.progress_tx = Some(progress_tx);
        self
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Fetch a batch's items and build its timeline
    pub async fn load(&self, batch_id: &BatchId) -> Result<Timeline> {
        let batch = self
            .batches
            .get_batch(batch_id)
            .await?
            .ok_or_else(|| SyncError::BatchNotFound(batch_id.to_string()))?;

        let items = self.store.list_by_batch(batch_id).await?;
        let course_lookup = self.resolve(&items).await?;

        info!(
            "Loaded batch {} with {} items ({} resolved recordings)",
            batch_id,
            items.len(),
            course_lookup.len()
        );

        let mut timeline = Timeline::new(batch, items, course_lookup, self.config.clone());
        timeline.order_groups_by_schedule();
        Ok(timeline)
    }

    /// Re-resolve every recording's course and regroup
    pub async fn refresh_courses(&self, timeline: &mut Timeline) -> Result<()> {
        let course_lookup = self.resolve(timeline.items()).await?;
        debug!("Refreshed {} course resolutions", course_lookup.len());
        timeline.set_course_lookup(course_lookup);
        Ok(())
    }

    /// Persist a single new item
    ///
    /// Once the store accepts the item it is part of the timeline. If its
    /// course cannot be resolved right away it stays uncategorized until the
    /// next [`TimelineSync::refresh_courses`].
    pub async fn add_item(
        &self,
        timeline: &mut Timeline,
        draft: TimelineItemDraft,
    ) -> Result<TimelineItem> {
        let batch_id = timeline.batch().id.clone();
        let item = self.store.create_item(&batch_id, draft).await?;

        info!("Added '{}' at day {}", item.title, item.drip_offset_days);
        timeline.insert_items(vec![item.clone()]);

        if let Some(recording_id) = item.recording_id() {
            if !timeline.course_lookup().contains_key(recording_id) {
                match self
                    .catalog
                    .resolve_courses(std::slice::from_ref(recording_id))
                    .await
                {
                    Ok(resolved) => timeline.merge_course_lookup(resolved),
                    Err(e) => warn!(
                        "Course lookup for {} failed, left uncategorized: {}",
                        recording_id, e
                    ),
                }
            }
        }

        Ok(item)
    }

    /// Import a course's recordings after the current schedule
    ///
    /// Recordings already in the batch are skipped.
    pub async fn import_course(
        &self,
        timeline: &mut Timeline,
        course_id: &CourseId,
        options: ImportOptions,
    ) -> Result<BulkWriteReport> {
        let course = self
            .catalog
            .get_course(course_id)
            .await?
            .ok_or_else(|| SyncError::CourseNotFound(course_id.to_string()))?;

        let mut recordings = self.catalog.course_recordings(course_id).await?;
        recordings.sort_by_key(|recording| (recording.module_order, recording.sequence_order));
        let candidates: Vec<ImportCandidate> =
            recordings.into_iter().map(ImportCandidate::from).collect();

        let drafts = timeline.plan_import(candidates, options.base_offset_days, options.interval_days);
        info!(
            "Importing {} recordings from '{}' into batch {}",
            drafts.len(),
            course.title,
            timeline.batch().id
        );

        let batch_id = timeline.batch().id.clone();
        let mut run = BulkRun::new(BulkOperation::Import, drafts.len(), self.progress_tx.as_ref());
        let mut created = Vec::with_capacity(drafts.len());

        for draft in drafts {
            let target = draft
                .recording_id()
                .map_or_else(|| draft.title.clone(), ToString::to_string);

            match self.store.create_item(&batch_id, draft).await {
                Ok(item) => {
                    run.succeeded(&target).await;
                    created.push(item);
                }
                Err(e) => run.failed(&target, &e).await,
            }
        }

        let resolved: HashMap<RecordingId, CourseRef> = created
            .iter()
            .filter_map(TimelineItem::recording_id)
            .map(|recording_id| (recording_id.clone(), course.clone()))
            .collect();
        timeline.merge_course_lookup(resolved);
        timeline.insert_items(created);

        Ok(run.finish())
    }

    /// Drag a group onto another and persist the shifted offsets
    pub async fn reorder_groups(
        &self,
        timeline: &mut Timeline,
        active: &GroupId,
        over: &GroupId,
    ) -> Result<BulkWriteReport> {
        let previous_order = timeline.group_order().to_vec();
        let updates = timeline.move_group(active, over);
        if updates.is_empty() {
            debug!("Group drag {} -> {} changed nothing", active, over);
            return Ok(BulkWriteReport::default());
        }

        info!(
            "Moving group {} to the position of {} ({} items shift)",
            active,
            over,
            updates.len()
        );

        let mut run = BulkRun::new(BulkOperation::Reorder, updates.len(), self.progress_tx.as_ref());
        let mut persisted = Vec::with_capacity(updates.len());

        for update in &updates {
            let target = update.item_id.to_string();
            let write = TimelineItemUpdate::offset(update.new_offset_days);

            match self.store.update_item(&update.item_id, write).await {
                Ok(item) => {
                    run.succeeded(&target).await;
                    persisted.push(item);
                }
                Err(e) => run.failed(&target, &e).await,
            }
        }

        if persisted.is_empty() {
            warn!("No offsets were written, restoring the previous group order");
            timeline.restore_group_order(previous_order);
        } else {
            timeline.replace_items(persisted);
        }
        Ok(run.finish())
    }

    /// Delete one item
    pub async fn delete_item(&self, timeline: &mut Timeline, id: &TimelineItemId) -> Result<()> {
        if timeline.item(id).is_none() {
            return Err(ScheduleError::UnknownItem(id.to_string()).into());
        }

        self.store.delete_item(id).await?;
        timeline.remove_items(std::slice::from_ref(id));
        info!("Deleted item {}", id);
        Ok(())
    }

    /// Delete every item of a group
    pub async fn delete_group(
        &self,
        timeline: &mut Timeline,
        group_id: &GroupId,
    ) -> Result<BulkWriteReport> {
        let ids: Vec<TimelineItemId> = timeline
            .group_items(group_id)?
            .iter()
            .map(|item| item.id.clone())
            .collect();

        info!("Deleting group {} ({} items)", group_id, ids.len());

        let mut run = BulkRun::new(BulkOperation::Delete, ids.len(), self.progress_tx.as_ref());
        let mut deleted = Vec::with_capacity(ids.len());

        for id in ids {
            match self.store.delete_item(&id).await {
                Ok(()) => {
                    run.succeeded(id.as_str()).await;
                    deleted.push(id);
                }
                Err(e) => run.failed(id.as_str(), &e).await,
            }
        }

        timeline.remove_items(&deleted);
        Ok(run.finish())
    }

    async fn resolve(&self, items: &[TimelineItem]) -> Result<HashMap<RecordingId, CourseRef>> {
        let mut seen = HashSet::new();
        let recording_ids: Vec<RecordingId> = items
            .iter()
            .filter_map(TimelineItem::recording_id)
            .filter(|recording_id| seen.insert(*recording_id))
            .cloned()
            .collect();

        if recording_ids.is_empty() {
            return Ok(HashMap::new());
        }

        Ok(self.catalog.resolve_courses(&recording_ids).await?)
    }
}

/// Bookkeeping for one bulk write
struct BulkRun<'a> {
    operation: BulkOperation,
    report: BulkWriteReport,
    progress_tx: Option<&'a mpsc::Sender<BulkProgress>>,
}

impl<'a> BulkRun<'a> {
    fn new(
        operation: BulkOperation,
        total: usize,
        progress_tx: Option<&'a mpsc::Sender<BulkProgress>>,
    ) -> Self {
        Self {
            operation,
            report: BulkWriteReport::new(total),
            progress_tx,
        }
    }

    async fn succeeded(&mut self, target: &str) {
        self.report.succeeded += 1;
        self.publish(target).await;
    }

    async fn failed(&mut self, target: &str, error: &DripError) {
        warn!("{} write failed for {}: {}", self.operation, target, error);
        self.report.failed += 1;
        self.report.failures.push(WriteFailure {
            target: target.to_string(),
            message: error.to_string(),
        });
        self.publish(target).await;
    }

    async fn publish(&self, target: &str) {
        let Some(tx) = self.progress_tx else {
            return;
        };

        let total = self.report.total;
        let processed = self.report.processed();
        let progress = BulkProgress {
            operation: self.operation,
            total_items: total,
            processed_items: processed,
            successful_items: self.report.succeeded,
            failed_items: self.report.failed,
            current_item: Some(target.to_string()),
            percentage: if total == 0 {
                100.0
            } else {
                processed as f32 / total as f32 * 100.0
            },
        };
        let _ = tx.send(progress).await;
    }

    fn finish(self) -> BulkWriteReport {
        if self.report.failed > 0 {
            warn!(
                "{} finished with failures: {} written",
                self.operation, self.report
            );
        } else {
            info!("{} finished: {} written", self.operation, self.report);
        }
        self.report
    }
}
