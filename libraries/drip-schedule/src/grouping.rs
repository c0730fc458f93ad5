//! Grouping engine
//!
//! Partitions a batch's timeline into display groups:
//!
//! ```text
//! Course A        (recordings resolved to A, by offset then sequence)
//! Course B        (recordings resolved to B)
//! Other Recordings (recordings with no known course)
//! Live Sessions   (all live sessions, by offset)
//! ```
//!
//! Course groups appear in the order their first item is met in the input.
//! Grouping is never incremental: any change to the items or the course
//! lookup means calling [`build_groups`] again.

use crate::types::{Group, GroupIcon, GroupId};
use drip_core::types::{CourseId, CourseRef, RecordingId, TimelineContent, TimelineItem};
use std::collections::HashMap;

pub const UNCATEGORIZED_LABEL: &str = "Other Recordings";
pub const LIVE_SESSIONS_LABEL: &str = "Live Sessions";

/// Build groups in their default order
pub fn build_groups(
    items: &[TimelineItem],
    course_lookup: &HashMap<RecordingId, CourseRef>,
) -> Vec<Group> {
    let mut course_buckets: Vec<(CourseRef, Vec<TimelineItem>)> = Vec::new();
    let mut bucket_index: HashMap<CourseId, usize> = HashMap::new();
    let mut uncategorized = Vec::new();
    let mut live_sessions = Vec::new();

    for item in items {
        match &item.content {
            TimelineContent::LiveSession { .. } => live_sessions.push(item.clone()),
            TimelineContent::Recording { recording_id } => match course_lookup.get(recording_id) {
                Some(course) => {
                    let index = *bucket_index.entry(course.id.clone()).or_insert_with(|| {
                        course_buckets.push((course.clone(), Vec::new()));
                        course_buckets.len() - 1
                    });
                    course_buckets[index].1.push(item.clone());
                }
                None => uncategorized.push(item.clone()),
            },
        }
    }

    let mut groups = Vec::with_capacity(course_buckets.len() + 2);

    for (course, mut bucket) in course_buckets {
        bucket.sort_by_key(TimelineItem::schedule_key);
        groups.push(Group {
            id: GroupId::Course(course.id),
            label: course.title,
            icon: GroupIcon::Course,
            items: bucket,
        });
    }

    if !uncategorized.is_empty() {
        uncategorized.sort_by_key(TimelineItem::schedule_key);
        groups.push(Group {
            id: GroupId::Uncategorized,
            label: UNCATEGORIZED_LABEL.to_string(),
            icon: GroupIcon::Video,
            items: uncategorized,
        });
    }

    if !live_sessions.is_empty() {
        live_sessions.sort_by_key(|item| item.drip_offset_days);
        groups.push(Group {
            id: GroupId::LiveSessions,
            label: LIVE_SESSIONS_LABEL.to_string(),
            icon: GroupIcon::Live,
            items: live_sessions,
        });
    }

    groups
}
