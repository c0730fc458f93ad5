/// Timeline item domain types
use crate::types::{AssignmentId, RecordingId, TimelineItemId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// What a timeline item schedules
///
/// Only the fields meaningful for each kind are carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineContent {
    /// Pre-recorded lesson from the course catalog
    Recording {
        /// Weak reference to the catalog lesson
        recording_id: RecordingId,
    },

    /// Scheduled live class, batch-local times
    LiveSession {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Discriminator of [`TimelineContent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineItemKind {
    Recording,
    LiveSession,
}

impl TimelineContent {
    pub fn kind(&self) -> TimelineItemKind {
        match self {
            Self::Recording { .. } => TimelineItemKind::Recording,
            Self::LiveSession { .. } => TimelineItemKind::LiveSession,
        }
    }

    pub fn recording_id(&self) -> Option<&RecordingId> {
        match self {
            Self::Recording { recording_id } => Some(recording_id),
            Self::LiveSession { .. } => None,
        }
    }
}

/// A unit of content scheduled within a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineItem {
    /// Unique item identifier
    pub id: TimelineItemId,

    /// Display title
    pub title: String,

    /// Days after the batch start date at which the item unlocks
    pub drip_offset_days: u32,

    /// Tie-breaker among items sharing an offset
    pub sequence_order: u32,

    /// Assignment whose approval gates the next item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_id: Option<AssignmentId>,

    /// Kind-specific payload
    #[serde(flatten)]
    pub content: TimelineContent,
}

impl TimelineItem {
    /// Create a recording item with a fresh id
    pub fn recording(
        title: impl Into<String>,
        recording_id: impl Into<RecordingId>,
        drip_offset_days: u32,
        sequence_order: u32,
    ) -> Self {
        Self {
            id: TimelineItemId::generate(),
            title: title.into(),
            drip_offset_days,
            sequence_order,
            assignment_id: None,
            content: TimelineContent::Recording {
                recording_id: recording_id.into(),
            },
        }
    }

    /// Create a live session item with a fresh id
    pub fn live_session(
        title: impl Into<String>,
        drip_offset_days: u32,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: TimelineItemId::generate(),
            title: title.into(),
            drip_offset_days,
            sequence_order: 0,
            assignment_id: None,
            content: TimelineContent::LiveSession { start, end },
        }
    }

    /// Builder-style id override (for storage loading and tests)
    #[must_use]
    pub fn with_id(mut self, id: impl Into<TimelineItemId>) -> Self {
        self.id = id.into();
        self
    }

    /// Builder-style assignment gate
    #[must_use]
    pub fn with_assignment(mut self, assignment_id: impl Into<AssignmentId>) -> Self {
        self.assignment_id = Some(assignment_id.into());
        self
    }

    pub fn kind(&self) -> TimelineItemKind {
        self.content.kind()
    }

    pub fn recording_id(&self) -> Option<&RecordingId> {
        self.content.recording_id()
    }

    /// Key used to walk a timeline in schedule order
    pub fn schedule_key(&self) -> (u32, u32) {
        (self.drip_offset_days, self.sequence_order)
    }

    /// Promote a persisted draft into an item
    pub fn from_draft(id: TimelineItemId, draft: TimelineItemDraft) -> Self {
        Self {
            id,
            title: draft.title,
            drip_offset_days: draft.drip_offset_days,
            sequence_order: draft.sequence_order,
            assignment_id: draft.assignment_id,
            content: draft.content,
        }
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, update: &TimelineItemUpdate) {
        if let Some(title) = &update.title {
            self.title.clone_from(title);
        }
        if let Some(offset) = update.drip_offset_days {
            self.drip_offset_days = offset;
        }
        if let Some(order) = update.sequence_order {
            self.sequence_order = order;
        }
        if let Some(assignment) = &update.assignment_id {
            self.assignment_id.clone_from(assignment);
        }
    }
}

/// A timeline item that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineItemDraft {
    pub title: String,
    pub drip_offset_days: u32,
    pub sequence_order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_id: Option<AssignmentId>,
    #[serde(flatten)]
    pub content: TimelineContent,
}

impl TimelineItemDraft {
    pub fn recording_id(&self) -> Option<&RecordingId> {
        self.content.recording_id()
    }
}

/// Partial update of a timeline item; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drip_offset_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_order: Option<u32>,
    /// `Some(None)` clears the assignment gate (`null` on the wire)
    #[serde(
        default,
        deserialize_with = "present_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub assignment_id: Option<Option<AssignmentId>>,
}

/// A field that is present, even as `null`, is `Some`; absence is `None` via `default`
fn present_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl TimelineItemUpdate {
    /// Update that only moves an item to a new offset
    pub fn offset(drip_offset_days: u32) -> Self {
        Self {
            drip_offset_days: Some(drip_offset_days),
            ..Self::default()
        }
    }
}
