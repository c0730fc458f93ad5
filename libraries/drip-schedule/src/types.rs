//! Core types for drip scheduling

use crate::error::ScheduleError;
use drip_core::types::{CourseId, CourseRecording, RecordingId, TimelineItem, TimelineItemId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of a derived group
///
/// Groups are never stored; the id is what the session-local group order
/// remembers between regroups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum GroupId {
    /// Recordings resolved to a course
    Course(CourseId),

    /// Recordings whose course is unknown
    Uncategorized,

    /// All live sessions
    LiveSessions,
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Course(id) => write!(f, "course:{}", id),
            Self::Uncategorized => write!(f, "uncategorized"),
            Self::LiveSessions => write!(f, "live"),
        }
    }
}

impl FromStr for GroupId {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uncategorized" => Ok(Self::Uncategorized),
            "live" => Ok(Self::LiveSessions),
            _ => match s.strip_prefix("course:") {
                Some(id) if !id.is_empty() => Ok(Self::Course(CourseId::new(id))),
                _ => Err(ScheduleError::InvalidGroupId(s.to_string())),
            },
        }
    }
}

impl From<GroupId> for String {
    fn from(id: GroupId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for GroupId {
    type Error = ScheduleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Icon tag rendered next to a group label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupIcon {
    Course,
    Video,
    Live,
}

/// A derived bucket of timeline items sharing a course or a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub label: String,
    pub icon: GroupIcon,
    /// Items in display order
    pub items: Vec<TimelineItem>,
}

impl Group {
    /// Smallest offset in the group, `None` when empty
    pub fn first_offset(&self) -> Option<u32> {
        self.items.iter().map(|item| item.drip_offset_days).min()
    }

    /// Largest offset in the group, `None` when empty
    pub fn last_offset(&self) -> Option<u32> {
        self.items.iter().map(|item| item.drip_offset_days).max()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Proposed new offset for one item after a group reorder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOffsetUpdate {
    pub item_id: TimelineItemId,
    pub previous_offset_days: u32,
    pub new_offset_days: u32,
}

impl ItemOffsetUpdate {
    /// Whether persisting this update would change anything
    pub fn is_change(&self) -> bool {
        self.previous_offset_days != self.new_offset_days
    }
}

/// A recording selected for bulk import, in caller order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportCandidate {
    pub recording_id: RecordingId,
    pub title: String,
}

impl ImportCandidate {
    pub fn new(recording_id: impl Into<RecordingId>, title: impl Into<String>) -> Self {
        Self {
            recording_id: recording_id.into(),
            title: title.into(),
        }
    }
}

impl From<CourseRecording> for ImportCandidate {
    fn from(recording: CourseRecording) -> Self {
        Self {
            recording_id: recording.recording_id,
            title: recording.title,
        }
    }
}

/// Configuration for drip scheduling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Days between the last day of one group and the first day of the next
    /// after a group reorder (default: 1)
    pub group_gap_days: u32,

    /// Days between consecutive imported recordings (default: 1)
    pub default_import_interval_days: u32,

    /// Length of a live session window in minutes (default: 60)
    pub live_session_minutes: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            group_gap_days: 1,
            default_import_interval_days: 1,
            live_session_minutes: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ScheduleConfig::default();
        assert_eq!(config.group_gap_days, 1);
        assert_eq!(config.default_import_interval_days, 1);
        assert_eq!(config.live_session_minutes, 60);
    }

    #[test]
    fn group_id_parses_its_display_form() {
        for id in [
            GroupId::Course(CourseId::new("c-42")),
            GroupId::Uncategorized,
            GroupId::LiveSessions,
        ] {
            assert_eq!(id.to_string().parse::<GroupId>().unwrap(), id);
        }
    }

    #[test]
    fn group_id_rejects_garbage() {
        assert!("course:".parse::<GroupId>().is_err());
        assert!("modules".parse::<GroupId>().is_err());
    }

    #[test]
    fn group_id_serializes_as_string() {
        let json = serde_json::to_string(&GroupId::LiveSessions).unwrap();
        assert_eq!(json, "\"live\"");
    }

    #[test]
    fn offset_update_change_detection() {
        let update = ItemOffsetUpdate {
            item_id: TimelineItemId::new("i1"),
            previous_offset_days: 3,
            new_offset_days: 3,
        };
        assert!(!update.is_change());
    }
}
