//! Timeline - in-memory drip plan of one batch
//!
//! Coordinates grouping, session group order, offset recompute, import
//! planning, and unlock evaluation over a snapshot of a batch's items.
//! Every mutation regroups from scratch and reconciles the group order.

use crate::{
    deploy::{deploy_date, live_session_window, offset_for_date, DeployDate},
    error::{Result, ScheduleError},
    events::TimelineEvent,
    group_order::GroupOrder,
    grouping::build_groups,
    import::{default_base_offset, generate_import_offsets},
    recompute::recompute_offsets,
    types::{Group, GroupId, ImportCandidate, ItemOffsetUpdate, ScheduleConfig},
    unlock::{evaluate_unlocks, UnlockStatus},
};
use chrono::NaiveDate;
use drip_core::types::{
    AssignmentId, Batch, CourseRef, RecordingId, TimelineContent, TimelineItem,
    TimelineItemDraft, TimelineItemId,
};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Drip plan of one batch
#[derive(Debug, Clone)]
pub struct Timeline {
    batch: Batch,
    items: Vec<TimelineItem>,
    course_lookup: HashMap<RecordingId, CourseRef>,

    // Derived from items + course_lookup, default order
    groups: Vec<Group>,

    // Session-local, survives regroups
    order: GroupOrder,

    config: ScheduleConfig,

    // Event queue for view synchronization
    pending_events: Vec<TimelineEvent>,
}

impl Timeline {
    /// Create a timeline from a fetched snapshot
    pub fn new(
        batch: Batch,
        items: Vec<TimelineItem>,
        course_lookup: HashMap<RecordingId, CourseRef>,
        config: ScheduleConfig,
    ) -> Self {
        let mut timeline = Self {
            batch,
            items,
            course_lookup,
            groups: Vec::new(),
            order: GroupOrder::new(),
            config,
            pending_events: Vec::new(),
        };
        timeline.regroup();
        timeline
    }

    // ===== Snapshot access =====

    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: &TimelineItemId) -> Option<&TimelineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn course_lookup(&self) -> &HashMap<RecordingId, CourseRef> {
        &self.course_lookup
    }

    /// Items in schedule order (offset, then sequence)
    pub fn schedule_order(&self) -> Vec<&TimelineItem> {
        let mut ordered: Vec<&TimelineItem> = self.items.iter().collect();
        ordered.sort_by_key(|item| item.schedule_key());
        ordered
    }

    /// Whether a recording is already scheduled in this batch
    pub fn contains_recording(&self, recording_id: &RecordingId) -> bool {
        self.items
            .iter()
            .any(|item| item.recording_id() == Some(recording_id))
    }

    /// Recording ids the course lookup cannot resolve yet
    pub fn unresolved_recordings(&self) -> Vec<RecordingId> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .filter_map(TimelineItem::recording_id)
            .filter(|recording_id| !self.course_lookup.contains_key(*recording_id))
            .filter(|recording_id| seen.insert(*recording_id))
            .cloned()
            .collect()
    }

    // ===== Dates =====

    pub fn deploy_date(&self, item: &TimelineItem) -> DeployDate {
        deploy_date(self.batch.start_date, item.drip_offset_days)
    }

    pub fn item_deploy_date(&self, id: &TimelineItemId) -> Result<DeployDate> {
        self.item(id)
            .map(|item| self.deploy_date(item))
            .ok_or_else(|| ScheduleError::UnknownItem(id.to_string()))
    }

    /// Unlock state of every item for a student, in schedule order
    pub fn unlock_statuses(
        &self,
        today: NaiveDate,
        approved: &HashSet<AssignmentId>,
    ) -> Vec<(TimelineItemId, UnlockStatus)> {
        evaluate_unlocks(&self.items, self.batch.start_date, today, approved)
    }

    // ===== Groups =====

    /// Groups in the session order
    pub fn groups(&self) -> Vec<&Group> {
        self.order.arrange(&self.groups)
    }

    /// Groups in their default (derived) order
    pub fn default_groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group_order(&self) -> &[GroupId] {
        self.order.ids()
    }

    pub fn group(&self, id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|group| &group.id == id)
    }

    pub fn group_items(&self, id: &GroupId) -> Result<&[TimelineItem]> {
        self.group(id)
            .map(|group| group.items.as_slice())
            .ok_or_else(|| ScheduleError::UnknownGroup(id.to_string()))
    }

    /// Order groups by their first scheduled day
    ///
    /// A persisted schedule carries earlier group reorders only in its
    /// offsets; this recovers that order after a reload. Returns true if the
    /// order changed.
    pub fn order_groups_by_schedule(&mut self) -> bool {
        let order = GroupOrder::by_schedule(&self.groups);
        self.replace_order(order)
    }

    /// Put back an order captured with [`Timeline::group_order`]
    pub fn restore_group_order(&mut self, ids: Vec<GroupId>) -> bool {
        let order = GroupOrder::from_ids(ids, &self.groups);
        self.replace_order(order)
    }

    fn replace_order(&mut self, order: GroupOrder) -> bool {
        if order == self.order {
            return false;
        }
        self.order = order;
        self.emit_order_changed();
        true
    }

    /// Drag a group onto another group's position
    ///
    /// Returns the offset changes to persist; empty when the drag was a
    /// no-op. The items themselves are untouched until the caller applies
    /// the persisted updates with [`Timeline::apply_offset_updates`].
    pub fn move_group(&mut self, active: &GroupId, over: &GroupId) -> Vec<ItemOffsetUpdate> {
        if !self.order.move_over(active, over) {
            return Vec::new();
        }
        self.after_group_reorder()
    }

    /// Move a group to an explicit position
    pub fn reorder_group(&mut self, id: &GroupId, target_index: usize) -> Vec<ItemOffsetUpdate> {
        if !self.order.reorder(id, target_index) {
            return Vec::new();
        }
        self.after_group_reorder()
    }

    fn after_group_reorder(&mut self) -> Vec<ItemOffsetUpdate> {
        self.emit_order_changed();

        let updates: Vec<ItemOffsetUpdate> =
            recompute_offsets(self.order.ids(), &self.groups, self.config.group_gap_days)
                .into_iter()
                .filter(ItemOffsetUpdate::is_change)
                .collect();

        debug!(changed = updates.len(), "Recomputed offsets after group reorder");
        self.pending_events.push(TimelineEvent::OffsetsRecomputed {
            changed: updates.len(),
        });
        updates
    }

    // ===== Planning =====

    /// Base offset for the next import
    pub fn next_import_base(&self) -> u32 {
        default_base_offset(&self.items)
    }

    /// Drop candidates whose recording is already scheduled
    pub fn filter_new_candidates(&self, candidates: Vec<ImportCandidate>) -> Vec<ImportCandidate> {
        let mut seen: HashSet<RecordingId> = self
            .items
            .iter()
            .filter_map(TimelineItem::recording_id)
            .cloned()
            .collect();

        candidates
            .into_iter()
            .filter(|candidate| seen.insert(candidate.recording_id.clone()))
            .collect()
    }

    /// Drafts for importing `candidates` after the current schedule
    ///
    /// Already-scheduled recordings are skipped. `base_offset_days` and
    /// `interval_days` fall back to the next free day and the configured
    /// interval.
    pub fn plan_import(
        &self,
        candidates: Vec<ImportCandidate>,
        base_offset_days: Option<u32>,
        interval_days: Option<u32>,
    ) -> Vec<TimelineItemDraft> {
        let fresh = self.filter_new_candidates(candidates);
        generate_import_offsets(
            &fresh,
            base_offset_days.unwrap_or_else(|| self.next_import_base()),
            interval_days.unwrap_or(self.config.default_import_interval_days),
            u32::try_from(self.items.len()).unwrap_or(u32::MAX),
        )
    }

    /// Draft a live session on a calendar date
    pub fn plan_live_session(
        &self,
        title: impl Into<String>,
        date: NaiveDate,
    ) -> Result<TimelineItemDraft> {
        let start = self.batch.start_date.ok_or(ScheduleError::StartDateUnknown)?;
        let offset = offset_for_date(start, date)
            .ok_or(ScheduleError::DateOutOfRange { date, start })?;
        let (start_at, end_at) =
            live_session_window(&self.batch, offset, self.config.live_session_minutes)
                .ok_or(ScheduleError::DateOutOfRange { date, start })?;

        Ok(TimelineItemDraft {
            title: title.into(),
            drip_offset_days: offset,
            sequence_order: 0,
            assignment_id: None,
            content: TimelineContent::LiveSession {
                start: start_at,
                end: end_at,
            },
        })
    }

    // ===== Mutation =====

    /// Add persisted items
    pub fn insert_items(&mut self, items: Vec<TimelineItem>) {
        if items.is_empty() {
            return;
        }
        let item_ids = items.iter().map(|item| item.id.clone()).collect();
        self.items.extend(items);
        self.pending_events.push(TimelineEvent::ItemsAdded { item_ids });
        self.regroup();
    }

    /// Replace items with their persisted versions (matched by id)
    ///
    /// Items not in the timeline are ignored.
    pub fn replace_items(&mut self, updated: Vec<TimelineItem>) {
        let mut item_ids = Vec::new();
        for item in updated {
            if let Some(slot) = self.items.iter_mut().find(|known| known.id == item.id) {
                item_ids.push(item.id.clone());
                *slot = item;
            }
        }
        if item_ids.is_empty() {
            return;
        }
        self.pending_events.push(TimelineEvent::ItemsUpdated { item_ids });
        self.regroup();
    }

    /// Apply offset updates that were persisted successfully
    pub fn apply_offset_updates(&mut self, updates: &[ItemOffsetUpdate]) {
        let mut item_ids = Vec::new();
        for update in updates {
            if let Some(item) = self.items.iter_mut().find(|item| item.id == update.item_id) {
                item.drip_offset_days = update.new_offset_days;
                item_ids.push(update.item_id.clone());
            }
        }
        if item_ids.is_empty() {
            return;
        }
        self.pending_events.push(TimelineEvent::ItemsUpdated { item_ids });
        self.regroup();
    }

    /// Remove items by id, returning the removed ones
    pub fn remove_items(&mut self, ids: &[TimelineItemId]) -> Vec<TimelineItem> {
        let doomed: HashSet<&TimelineItemId> = ids.iter().collect();
        let (removed, kept): (Vec<TimelineItem>, Vec<TimelineItem>) = self
            .items
            .drain(..)
            .partition(|item| doomed.contains(&item.id));
        self.items = kept;

        if !removed.is_empty() {
            self.pending_events.push(TimelineEvent::ItemsRemoved {
                item_ids: removed.iter().map(|item| item.id.clone()).collect(),
            });
            self.regroup();
        }
        removed
    }

    /// Replace the course lookup
    pub fn set_course_lookup(&mut self, course_lookup: HashMap<RecordingId, CourseRef>) {
        self.course_lookup = course_lookup;
        self.regroup();
    }

    /// Merge late-arriving course resolutions
    pub fn merge_course_lookup(&mut self, resolved: HashMap<RecordingId, CourseRef>) {
        if resolved.is_empty() {
            return;
        }
        self.course_lookup.extend(resolved);
        self.regroup();
    }

    /// Change the batch metadata (start date edits are gated by status)
    pub fn set_batch(&mut self, batch: Batch) {
        self.batch = batch;
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<TimelineEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn regroup(&mut self) {
        self.groups = build_groups(&self.items, &self.course_lookup);
        debug!(
            groups = self.groups.len(),
            items = self.items.len(),
            "Regrouped timeline"
        );
        self.pending_events.push(TimelineEvent::GroupsRebuilt {
            group_count: self.groups.len(),
            item_count: self.items.len(),
        });

        if self.order.reconcile(&self.groups) {
            self.emit_order_changed();
        }
    }

    fn emit_order_changed(&mut self) {
        self.pending_events.push(TimelineEvent::GroupOrderChanged {
            order: self.order.ids().to_vec(),
        });
    }
}
