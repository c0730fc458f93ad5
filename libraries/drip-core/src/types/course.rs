/// Course catalog references
use crate::types::{CourseId, RecordingId};
use serde::{Deserialize, Serialize};

/// Owning course of a recording, as resolved by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseRef {
    /// Course identifier
    pub id: CourseId,

    /// Course title (group label)
    pub title: String,
}

impl CourseRef {
    pub fn new(id: impl Into<CourseId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// One recording in a course's module/lesson order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecording {
    /// Recording identifier
    pub recording_id: RecordingId,

    /// Lesson title
    pub title: String,

    /// Position of the owning module within the course
    pub module_order: u32,

    /// Position of the recording within its module
    pub sequence_order: u32,
}
