//! Flat list re-sequencing after a drag-and-drop move

/// Move the element at `from` to `to`, shifting the rest
///
/// Same-index moves and out-of-range indices return the list unchanged.
pub fn reindex<T: Clone>(list: &[T], from: usize, to: usize) -> Vec<T> {
    let mut moved = list.to_vec();
    if from != to && from < moved.len() && to < moved.len() {
        let element = moved.remove(from);
        moved.insert(to, element);
    }
    moved
}

/// Assign 1-based, gapless sequence numbers in list order
pub fn assign_sequence<T>(list: &mut [T], mut set_sequence: impl FnMut(&mut T, u32)) {
    for (index, element) in list.iter_mut().enumerate() {
        set_sequence(element, u32::try_from(index + 1).unwrap_or(u32::MAX));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_index_is_identity() {
        let list = vec!['a', 'b', 'c'];
        assert_eq!(reindex(&list, 1, 1), list);
    }

    #[test]
    fn moves_down_and_up() {
        let list = vec!['a', 'b', 'c', 'd'];
        assert_eq!(reindex(&list, 0, 2), vec!['b', 'c', 'a', 'd']);
        assert_eq!(reindex(&list, 3, 1), vec!['a', 'd', 'b', 'c']);
    }

    #[test]
    fn out_of_range_is_identity() {
        let list = vec![1, 2];
        assert_eq!(reindex(&list, 0, 9), list);
        assert_eq!(reindex(&list, 9, 0), list);
    }

    #[test]
    fn sequence_is_one_based_without_gaps() {
        let mut rows = vec![("a", 7), ("b", 0), ("c", 42)];
        assign_sequence(&mut rows, |row, seq| row.1 = seq);
        assert_eq!(rows, vec![("a", 1), ("b", 2), ("c", 3)]);
    }
}
