//! Session-local group ordering
//!
//! The order is seeded from the default group order and then adjusted by drag
//! reorders. It survives regroups: known ids keep their relative order, new
//! ids are appended, and ids of vanished groups are dropped.

use crate::types::{Group, GroupId};
use std::collections::HashSet;

/// Ordered list of group ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupOrder {
    ids: Vec<GroupId>,
}

impl GroupOrder {
    /// Create an empty order
    pub fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Seed from groups in their default order
    pub fn from_groups(groups: &[Group]) -> Self {
        let mut order = Self::new();
        order.reconcile(groups);
        order
    }

    /// Seed from groups sorted by their first scheduled day
    ///
    /// Ties keep the default order.
    pub fn by_schedule(groups: &[Group]) -> Self {
        let mut sorted: Vec<&Group> = groups.iter().collect();
        sorted.sort_by_key(|group| group.first_offset());
        Self {
            ids: sorted.into_iter().map(|group| group.id.clone()).collect(),
        }
    }

    /// Rebuild a captured order against the current groups
    pub fn from_ids(ids: Vec<GroupId>, groups: &[Group]) -> Self {
        let mut order = Self { ids };
        order.reconcile(groups);
        order
    }

    pub fn ids(&self) -> &[GroupId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn position(&self, id: &GroupId) -> Option<usize> {
        self.ids.iter().position(|known| known == id)
    }

    /// Reconcile against a freshly built group set
    ///
    /// Returns true if the order changed.
    pub fn reconcile(&mut self, groups: &[Group]) -> bool {
        let present: HashSet<&GroupId> = groups.iter().map(|group| &group.id).collect();

        let mut next: Vec<GroupId> = self
            .ids
            .iter()
            .filter(|id| present.contains(id))
            .cloned()
            .collect();

        for group in groups {
            if !next.contains(&group.id) {
                next.push(group.id.clone());
            }
        }

        if next == self.ids {
            false
        } else {
            self.ids = next;
            true
        }
    }

    /// Move a group to `target_index`
    ///
    /// Unknown ids, out-of-range targets, and same-position moves are silent
    /// no-ops. Returns true if the order changed.
    pub fn reorder(&mut self, id: &GroupId, target_index: usize) -> bool {
        let Some(from) = self.position(id) else {
            return false;
        };
        if target_index >= self.ids.len() || from == target_index {
            return false;
        }

        let moved = self.ids.remove(from);
        self.ids.insert(target_index, moved);
        true
    }

    /// Drag-end adapter: move `active` to where `over` currently sits
    pub fn move_over(&mut self, active: &GroupId, over: &GroupId) -> bool {
        match self.position(over) {
            Some(target) => self.reorder(active, target),
            None => false,
        }
    }

    /// Resolve groups in this order
    ///
    /// Groups missing from the order (not yet reconciled) follow in their
    /// given order.
    pub fn arrange<'a>(&self, groups: &'a [Group]) -> Vec<&'a Group> {
        let mut arranged: Vec<&Group> = self
            .ids
            .iter()
            .filter_map(|id| groups.iter().find(|group| &group.id == id))
            .collect();

        for group in groups {
            if !self.ids.contains(&group.id) {
                arranged.push(group);
            }
        }

        arranged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GroupIcon;
    use drip_core::types::CourseId;

    fn course(id: &str) -> GroupId {
        GroupId::Course(CourseId::new(id))
    }

    fn group(id: GroupId) -> Group {
        Group {
            label: id.to_string(),
            id,
            icon: GroupIcon::Course,
            items: Vec::new(),
        }
    }

    fn groups(ids: &[GroupId]) -> Vec<Group> {
        ids.iter().cloned().map(group).collect()
    }

    #[test]
    fn seeds_from_default_order() {
        let order = GroupOrder::from_groups(&groups(&[course("a"), GroupId::LiveSessions]));
        assert_eq!(order.ids(), &[course("a"), GroupId::LiveSessions]);
    }

    #[test]
    fn reconcile_keeps_known_order_drops_vanished_appends_new() {
        let mut order =
            GroupOrder::from_groups(&groups(&[course("a"), course("b"), GroupId::LiveSessions]));
        assert!(order.reorder(&GroupId::LiveSessions, 0));

        let changed = order.reconcile(&groups(&[
            course("c"),
            course("b"),
            GroupId::LiveSessions,
        ]));

        assert!(changed);
        assert_eq!(
            order.ids(),
            &[GroupId::LiveSessions, course("b"), course("c")]
        );
    }

    #[test]
    fn reconcile_with_same_groups_is_unchanged() {
        let set = groups(&[course("a"), course("b")]);
        let mut order = GroupOrder::from_groups(&set);
        assert!(!order.reconcile(&set));
    }

    #[test]
    fn reorder_moves_forward_and_back() {
        let mut order =
            GroupOrder::from_groups(&groups(&[course("a"), course("b"), course("c")]));

        assert!(order.reorder(&course("a"), 2));
        assert_eq!(order.ids(), &[course("b"), course("c"), course("a")]);

        assert!(order.reorder(&course("a"), 0));
        assert_eq!(order.ids(), &[course("a"), course("b"), course("c")]);
    }

    #[test]
    fn reorder_no_ops() {
        let mut order = GroupOrder::from_groups(&groups(&[course("a"), course("b")]));
        let before = order.clone();

        assert!(!order.reorder(&course("a"), 0));
        assert!(!order.reorder(&course("zzz"), 1));
        assert!(!order.reorder(&course("a"), 5));
        assert!(!order.move_over(&course("a"), &GroupId::Uncategorized));
        assert_eq!(order, before);
    }

    #[test]
    fn move_over_targets_the_hovered_group() {
        let mut order = GroupOrder::from_groups(&groups(&[
            course("a"),
            course("b"),
            GroupId::LiveSessions,
        ]));

        assert!(order.move_over(&GroupId::LiveSessions, &course("a")));
        assert_eq!(
            order.ids(),
            &[GroupId::LiveSessions, course("a"), course("b")]
        );
    }

    #[test]
    fn schedule_seed_follows_first_offsets() {
        let scheduled = |id: GroupId, first: u32| Group {
            items: vec![drip_core::types::TimelineItem::recording("x", "r", first, 0)],
            ..group(id)
        };
        let set = vec![
            scheduled(course("a"), 4),
            scheduled(course("b"), 4),
            scheduled(GroupId::LiveSessions, 0),
        ];

        let order = GroupOrder::by_schedule(&set);
        assert_eq!(
            order.ids(),
            &[GroupId::LiveSessions, course("a"), course("b")]
        );
    }

    #[test]
    fn captured_order_is_reconciled_on_restore() {
        let set = groups(&[course("a"), GroupId::LiveSessions]);
        let order = GroupOrder::from_ids(vec![GroupId::LiveSessions, course("gone")], &set);
        assert_eq!(order.ids(), &[GroupId::LiveSessions, course("a")]);
    }

    #[test]
    fn arrange_appends_unreconciled_groups() {
        let order = GroupOrder::from_groups(&groups(&[course("b")]));
        let set = groups(&[course("a"), course("b")]);

        let arranged: Vec<&GroupId> = order.arrange(&set).iter().map(|g| &g.id).collect();
        assert_eq!(arranged, vec![&course("b"), &course("a")]);
    }
}
