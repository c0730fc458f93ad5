//! Offset recompute after a group reorder
//!
//! Groups are laid out back to back in the requested order, starting at the
//! smallest offset present anywhere in the timeline:
//!
//! ```text
//! before:  Live [0 .. 3]   Course A [1 .. 4]
//! order:   Course A, Live            gap_days = 1
//! after:   Course A [0 .. 3]   Live [4 .. 7]
//! ```
//!
//! Each group keeps its internal span (item offset minus the group's first
//! offset), so the relative order and spacing inside a group never change.
//! The next group starts `gap_days` after the previous group's last day.

use crate::types::{Group, GroupId, ItemOffsetUpdate};
use std::collections::HashSet;

/// Propose new offsets for every item, in laid-out order
///
/// Ids in `order` without a group are ignored; groups missing from `order`
/// are laid out after the ordered ones in their given order. Pure: callers
/// decide which updates (see [`ItemOffsetUpdate::is_change`]) to persist.
pub fn recompute_offsets(
    order: &[GroupId],
    groups: &[Group],
    gap_days: u32,
) -> Vec<ItemOffsetUpdate> {
    let Some(mut cursor) = groups.iter().filter_map(Group::first_offset).min() else {
        return Vec::new();
    };

    let mut seen: HashSet<&GroupId> = HashSet::new();
    let mut laid_out: Vec<&Group> = Vec::with_capacity(groups.len());
    for id in order {
        if let Some(group) = groups.iter().find(|group| &group.id == id) {
            if seen.insert(&group.id) {
                laid_out.push(group);
            }
        }
    }
    for group in groups {
        if seen.insert(&group.id) {
            laid_out.push(group);
        }
    }

    let mut updates = Vec::with_capacity(groups.iter().map(Group::len).sum());
    for group in laid_out {
        let Some(base) = group.first_offset() else {
            continue;
        };

        let mut last = cursor;
        for item in &group.items {
            let new_offset = cursor.saturating_add(item.drip_offset_days - base);
            last = last.max(new_offset);
            updates.push(ItemOffsetUpdate {
                item_id: item.id.clone(),
                previous_offset_days: item.drip_offset_days,
                new_offset_days: new_offset,
            });
        }

        cursor = last.saturating_add(gap_days);
    }

    updates
}
