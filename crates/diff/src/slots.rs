//! Occupancy index over a fixed row of slots.
//!
//! The diff engine lays every position an item can hold during replay out on
//! one line of slots. `SlotIndex` tracks which slots are occupied and answers
//! "how many occupied slots precede slot `s`", which is exactly the list index
//! of the item sitting in `s`. Backed by a Fenwick tree, so every operation is
//! O(log n).

use alloc::vec;
use alloc::vec::Vec;

#[derive(Clone, Debug)]
pub(crate) struct SlotIndex {
    /// 1-based Fenwick tree of occupancy counts.
    tree: Vec<u32>,
    occupied: Vec<bool>,
}

impl SlotIndex {
    /// Creates an index from an initial occupancy map.
    pub(crate) fn from_occupied(occupied: Vec<bool>) -> Self {
        let len = occupied.len();

        // Linear-time build: push each node's count to its parent.
        let mut tree = vec![0u32; len + 1];
        for i in 1..=len {
            tree[i] += u32::from(occupied[i - 1]);
            let parent = i + lowest_bit(i);
            if parent <= len {
                tree[parent] += tree[i];
            }
        }

        Self { tree, occupied }
    }

    /// Returns the number of slots.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.occupied.len()
    }

    /// Returns true if `slot` is occupied.
    #[inline]
    pub(crate) fn is_occupied(&self, slot: usize) -> bool {
        self.occupied[slot]
    }

    /// Marks `slot` occupied. No-op if it already is.
    pub(crate) fn occupy(&mut self, slot: usize) {
        if !self.occupied[slot] {
            self.occupied[slot] = true;
            self.update(slot, true);
        }
    }

    /// Marks `slot` free. No-op if it already is.
    pub(crate) fn vacate(&mut self, slot: usize) {
        if self.occupied[slot] {
            self.occupied[slot] = false;
            self.update(slot, false);
        }
    }

    /// Returns the number of occupied slots strictly before `slot`.
    pub(crate) fn rank(&self, slot: usize) -> usize {
        let mut i = slot;
        let mut sum = 0usize;
        while i > 0 {
            sum += self.tree[i] as usize;
            i -= lowest_bit(i);
        }
        sum
    }

    fn update(&mut self, slot: usize, increment: bool) {
        let mut i = slot + 1;
        while i < self.tree.len() {
            if increment {
                self.tree[i] += 1;
            } else {
                self.tree[i] -= 1;
            }
            i += lowest_bit(i);
        }
    }
}

#[inline]
fn lowest_bit(i: usize) -> usize {
    i & i.wrapping_neg()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn naive_rank(index: &SlotIndex, slot: usize) -> usize {
        (0..slot).filter(|&s| index.is_occupied(s)).count()
    }

    fn prefix_filled(len: usize, filled: usize) -> SlotIndex {
        SlotIndex::from_occupied((0..len).map(|s| s < filled).collect())
    }

    #[test]
    fn test_empty_index() {
        let index = SlotIndex::from_occupied(vec![false; 4]);
        assert_eq!(index.len(), 4);
        for slot in 0..=4 {
            assert_eq!(index.rank(slot), 0);
        }
    }

    #[test]
    fn test_prefix_filled_ranks() {
        let index = prefix_filled(7, 5);
        for slot in 0..=7 {
            assert_eq!(index.rank(slot), slot.min(5));
        }
        assert!(index.is_occupied(4));
        assert!(!index.is_occupied(5));
    }

    #[test]
    fn test_occupy_and_vacate() {
        let mut index = prefix_filled(6, 3);
        index.vacate(1);
        assert_eq!(index.rank(3), 2);

        index.occupy(5);
        assert_eq!(index.rank(5), 2);
        assert_eq!(index.rank(6), 3);

        // Repeated calls don't double count.
        index.occupy(5);
        index.vacate(1);
        assert_eq!(index.rank(6), 3);
    }

    #[test]
    fn test_scattered_occupancy() {
        let index = SlotIndex::from_occupied(vec![false, true, false, true, true, false]);
        assert_eq!(index.rank(0), 0);
        assert_eq!(index.rank(2), 1);
        assert_eq!(index.rank(4), 2);
        assert_eq!(index.rank(6), 3);
    }

    #[test]
    fn test_matches_naive_rank() {
        let mut index = prefix_filled(33, 20);
        for slot in (0..33).step_by(3) {
            index.vacate(slot);
        }
        for slot in (21..33).step_by(2) {
            index.occupy(slot);
        }
        for slot in 0..33 {
            assert_eq!(index.rank(slot), naive_rank(&index, slot), "slot {}", slot);
        }
    }
}
