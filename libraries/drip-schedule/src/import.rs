//! Bulk import offset generation
//!
//! Imported recordings are appended after the latest scheduled item unless
//! the caller overrides the base offset:
//!
//! ```text
//! existing: 3 items, base = 5, interval = 2
//! import:   [x, y, z] -> offsets [5, 7, 9], sequence [3, 4, 5]
//! ```
//!
//! An interval of zero releases every imported recording on the same day.

use crate::types::ImportCandidate;
use drip_core::types::{TimelineContent, TimelineItem, TimelineItemDraft};

/// Default base offset: the day after the latest scheduled item, or 0
pub fn default_base_offset(existing: &[TimelineItem]) -> u32 {
    existing
        .iter()
        .map(|item| item.drip_offset_days)
        .max()
        .map_or(0, |latest| latest.saturating_add(1))
}

/// Generate drafts for the selected recordings
///
/// The generator performs no existence checks; already-scheduled recordings
/// must be filtered out by the caller.
pub fn generate_import_offsets(
    selected: &[ImportCandidate],
    base_offset_days: u32,
    interval_days: u32,
    existing_item_count: u32,
) -> Vec<TimelineItemDraft> {
    selected
        .iter()
        .enumerate()
        .map(|(index, candidate)| {
            let index = u32::try_from(index).unwrap_or(u32::MAX);
            TimelineItemDraft {
                title: candidate.title.clone(),
                drip_offset_days: base_offset_days
                    .saturating_add(index.saturating_mul(interval_days)),
                sequence_order: existing_item_count.saturating_add(index),
                assignment_id: None,
                content: TimelineContent::Recording {
                    recording_id: candidate.recording_id.clone(),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(count: usize) -> Vec<ImportCandidate> {
        (0..count)
            .map(|i| ImportCandidate::new(format!("rec-{}", i), format!("Lesson {}", i)))
            .collect()
    }

    #[test]
    fn offsets_step_by_interval_and_sequence_follows_existing() {
        let drafts = generate_import_offsets(&candidates(3), 5, 2, 3);

        let offsets: Vec<u32> = drafts.iter().map(|d| d.drip_offset_days).collect();
        let sequence: Vec<u32> = drafts.iter().map(|d| d.sequence_order).collect();
        assert_eq!(offsets, vec![5, 7, 9]);
        assert_eq!(sequence, vec![3, 4, 5]);
    }

    #[test]
    fn zero_interval_releases_same_day() {
        let drafts = generate_import_offsets(&candidates(4), 10, 0, 0);
        let offsets: Vec<u32> = drafts.iter().map(|d| d.drip_offset_days).collect();
        assert_eq!(offsets, vec![10, 10, 10, 10]);
    }

    #[test]
    fn drafts_keep_caller_order_and_recording_refs() {
        let drafts = generate_import_offsets(&candidates(2), 0, 1, 0);
        assert_eq!(drafts[0].title, "Lesson 0");
        assert_eq!(drafts[1].recording_id().map(|r| r.as_str()), Some("rec-1"));
    }

    #[test]
    fn base_defaults_after_latest_item() {
        assert_eq!(default_base_offset(&[]), 0);

        let existing = vec![
            TimelineItem::recording("a", "r1", 4, 0),
            TimelineItem::recording("b", "r2", 11, 1),
            TimelineItem::recording("c", "r3", 2, 2),
        ];
        assert_eq!(default_base_offset(&existing), 12);
    }

    #[test]
    fn offsets_saturate_instead_of_overflowing() {
        let drafts = generate_import_offsets(&candidates(2), u32::MAX - 1, 5, 0);
        assert_eq!(drafts[1].drip_offset_days, u32::MAX);
    }
}
