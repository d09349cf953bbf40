//! Property-based tests for docview-diff using proptest.
//!
//! These tests check the replay contract and the classification rules on
//! randomly generated pairs of result sets.

use docview_diff::{apply_changes, compute_changes, ChangeKind, DocumentChange};
use proptest::prelude::*;
use std::collections::HashMap;

type Item = (u32, u8);

/// Strategy for an identity-unique result set drawn from a small key space so
/// that consecutive versions overlap.
fn result_set_strategy(max_len: usize) -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec((0u32..40, 0u8..3), 0..max_len)
        .prop_map(|items| {
            let mut seen = std::collections::HashSet::new();
            items.into_iter().filter(|(key, _)| seen.insert(*key)).collect::<Vec<_>>()
        })
        .prop_shuffle()
}

/// Strategy for a permutation of `0..len` paired with the identity payload.
fn permutation_strategy(max_len: usize) -> impl Strategy<Value = (Vec<Item>, Vec<Item>)> {
    (0..max_len)
        .prop_flat_map(|len| {
            let previous: Vec<Item> = (0..len as u32).map(|k| (k, 0)).collect();
            (Just(previous.clone()), Just(previous).prop_shuffle())
        })
}

fn replay(previous: &[Item], changes: &[DocumentChange<Item>]) -> Vec<Item> {
    let mut list = previous.to_vec();
    apply_changes(&mut list, changes).expect("indices stay in bounds");
    list
}

fn positions(items: &[Item]) -> HashMap<u32, (usize, u8)> {
    items.iter().enumerate().map(|(i, &(k, v))| (k, (i, v))).collect()
}

proptest! {
    /// Replaying the records in order reproduces `next`.
    #[test]
    fn replay_reproduces_next(
        previous in result_set_strategy(30),
        next in result_set_strategy(30),
    ) {
        let changes = compute_changes(&previous, &next).unwrap();
        prop_assert_eq!(replay(&previous, &changes), next);
    }

    /// Each key yields at most one record, classified by membership, payload
    /// and absolute position.
    #[test]
    fn classification_matches_membership(
        previous in result_set_strategy(30),
        next in result_set_strategy(30),
    ) {
        let changes = compute_changes(&previous, &next).unwrap();
        let before = positions(&previous);
        let after = positions(&next);

        let mut reported = HashMap::new();
        for change in &changes {
            let key = change.item().0;
            prop_assert!(reported.insert(key, change.kind()).is_none(), "key {} reported twice", key);
        }

        for (key, &(old_pos, old_payload)) in &before {
            match after.get(key) {
                None => prop_assert_eq!(reported.get(key), Some(&ChangeKind::Removed)),
                Some(&(new_pos, new_payload)) => {
                    if old_pos == new_pos && old_payload == new_payload {
                        prop_assert_eq!(reported.get(key), None);
                    } else {
                        prop_assert_eq!(reported.get(key), Some(&ChangeKind::Modified));
                    }
                }
            }
        }
        for key in after.keys() {
            if !before.contains_key(key) {
                prop_assert_eq!(reported.get(key), Some(&ChangeKind::Added));
            }
        }
    }

    /// Removed records come first, then the rest ordered by final position,
    /// and indices are `None` exactly where the kind says so.
    #[test]
    fn emission_order_and_index_shape(
        previous in result_set_strategy(30),
        next in result_set_strategy(30),
    ) {
        let changes = compute_changes(&previous, &next).unwrap();
        let before = positions(&previous);
        let after = positions(&next);

        let first_kept = changes.iter().position(|c| !c.is_removed()).unwrap_or(changes.len());
        prop_assert!(changes[first_kept..].iter().all(|c| !c.is_removed()));

        let removed_positions: Vec<usize> =
            changes[..first_kept].iter().map(|c| before[&c.item().0].0).collect();
        prop_assert!(removed_positions.windows(2).all(|w| w[0] < w[1]));

        let final_positions: Vec<usize> =
            changes[first_kept..].iter().map(|c| after[&c.item().0].0).collect();
        prop_assert!(final_positions.windows(2).all(|w| w[0] < w[1]));

        for change in &changes {
            prop_assert_eq!(change.old_index().is_none(), change.kind() == ChangeKind::Added);
            prop_assert_eq!(change.new_index().is_none(), change.kind() == ChangeKind::Removed);
        }
    }

    /// Permuting an unchanged set yields one Modified record per displaced item.
    #[test]
    fn pure_reorder_only_modifies((previous, next) in permutation_strategy(25)) {
        let changes = compute_changes(&previous, &next).unwrap();
        let displaced = previous.iter().zip(&next).filter(|(a, b)| a != b).count();

        prop_assert_eq!(changes.len(), displaced);
        prop_assert!(changes.iter().all(|c| c.is_modified()));
        prop_assert_eq!(replay(&previous, &changes), next);
    }

    /// Diffing a set against itself is empty.
    #[test]
    fn identical_sets_are_quiet(items in result_set_strategy(30)) {
        prop_assert!(compute_changes(&items, &items).unwrap().is_empty());
    }

    /// Without shared keys the output is all removals, then all additions.
    #[test]
    fn disjoint_sets_remove_then_add(
        previous in result_set_strategy(20),
        next in result_set_strategy(20),
    ) {
        let next: Vec<Item> = next.into_iter().map(|(k, v)| (k + 1000, v)).collect();
        let changes = compute_changes(&previous, &next).unwrap();

        prop_assert_eq!(changes.len(), previous.len() + next.len());
        prop_assert!(changes[..previous.len()].iter().all(|c| c.is_removed() && c.new_index().is_none()));
        prop_assert!(changes[previous.len()..].iter().all(|c| c.is_added() && c.old_index().is_none()));
        prop_assert_eq!(replay(&previous, &changes), next);
    }
}

#[test]
fn duplicate_keys_fail_fast() {
    let previous: Vec<Item> = vec![(1, 0), (2, 0), (1, 1)];
    let err = compute_changes(&previous, &[]).unwrap_err();
    assert!(err.is_invariant_violation());
    assert!(err.to_string().contains('1'));
}

#[test]
fn large_shuffle_replays() {
    // Deterministic interleaving of removals, insertions and moves.
    let previous: Vec<Item> = (0..2000).map(|k| (k, 0)).collect();
    let next: Vec<Item> = (0..2000)
        .rev()
        .filter(|k| k % 7 != 0)
        .map(|k| (k, (k % 3) as u8))
        .chain((5000..5100).map(|k| (k, 0)))
        .collect();

    let changes = compute_changes(&previous, &next).unwrap();
    assert_eq!(replay(&previous, &changes), next);
}
