mod batch;
mod course;
mod ids;
mod timeline_item;

pub use batch::{Batch, BatchStatus};
pub use course::{CourseRecording, CourseRef};
pub use ids::{AssignmentId, BatchId, CourseId, RecordingId, TimelineItemId};
pub use timeline_item::{
    TimelineContent, TimelineItem, TimelineItemDraft, TimelineItemKind, TimelineItemUpdate,
};
