//! Ordered result-set diffing.
//!
//! `compute_changes` matches items of two ordered result sets by identity key
//! and produces the change records that turn the previous set into the next
//! one under sequential replay.
//!
//! # Emission order
//!
//! 1. `Removed` records, ascending by position in the previous set.
//! 2. `Modified` and `Added` records, ascending by position in the next set.
//!
//! Every index already accounts for the records emitted before it.
//!
//! # Slot layout
//!
//! Positions are computed on a single line of slots holding every place an
//! item occupies at some point during replay:
//!
//! - one "old" slot per previous item, in previous order;
//! - one "new" slot per next item that needs a record, placed right after the
//!   slot of the item preceding it in the next set.
//!
//! Items that keep both content and absolute position ("stationary" items)
//! never move, so they act as anchors: the next-set items between two anchors
//! get their new slots between those anchors' old slots. Replaying a record
//! vacates the item's old slot and occupies its new slot, and the item's list
//! index at that moment is the number of occupied slots before it. Once every
//! record has been replayed the occupied slots, read left to right, spell out
//! the next set.

use crate::change::DocumentChange;
use crate::slots::SlotIndex;
use alloc::vec;
use alloc::vec::Vec;
use docview_core::{Error, Keyed, Result};
use hashbrown::HashMap;
use log::{debug, trace};

/// Slot for next-set items that produce no record.
const NO_SLOT: usize = usize::MAX;

/// Computes the change records that transform `previous` into `next`.
///
/// An item present in both sets is reported as `Modified` if its payload
/// differs or its position differs; otherwise it is omitted. Items only in
/// `previous` are `Removed` and items only in `next` are `Added`.
///
/// Replaying the returned records in order against a copy of `previous`
/// (remove at `old_index`, then insert at `new_index`) yields `next`.
///
/// Positions are compared as absolute positions, so an item pushed along by an
/// insertion or removal before it is still reported as `Modified`. Once the
/// earlier records are replayed such an item may already sit at its final
/// place, and its record then has `old_index == new_index`.
///
/// # Errors
///
/// Returns `Error::InvariantViolation` if either set contains the same
/// identity key twice.
///
/// # Example
///
/// ```rust
/// use docview_diff::{compute_changes, ChangeKind};
///
/// let previous = [("a", 1), ("b", 1), ("c", 1)];
/// let next = [("a", 1), ("c", 1), ("d", 1)];
///
/// let changes = compute_changes(&previous, &next).unwrap();
/// let kinds: Vec<_> = changes.iter().map(|c| c.kind()).collect();
/// assert_eq!(kinds, [ChangeKind::Removed, ChangeKind::Modified, ChangeKind::Added]);
/// ```
pub fn compute_changes<T>(previous: &[T], next: &[T]) -> Result<Vec<DocumentChange<T>>>
where
    T: Keyed + Clone,
{
    let previous_positions = position_map(previous, "previous")?;
    let next_positions = position_map(next, "next")?;

    // Where each previous item lands in `next`, if anywhere.
    let targets: Vec<Option<usize>> = previous
        .iter()
        .map(|item| next_positions.get(item.key()).copied())
        .collect();

    let stationary: Vec<bool> = previous
        .iter()
        .zip(&targets)
        .enumerate()
        .map(|(i, (item, target))| *target == Some(i) && item.payload_eq(&next[i]))
        .collect();
    // Stationary items hold the same position on both sides.
    let is_stationary_next = |j: usize| j < stationary.len() && stationary[j];

    let (old_slots, new_slots, occupied) =
        layout_slots(&stationary, next.len(), is_stationary_next);
    let mut slots = SlotIndex::from_occupied(occupied);
    debug_assert_eq!(
        slots.len(),
        old_slots.len() + new_slots.iter().filter(|&&s| s != NO_SLOT).count()
    );

    let mut changes = Vec::new();

    for (i, item) in previous.iter().enumerate() {
        if targets[i].is_none() {
            let old_index = slots.rank(old_slots[i]);
            slots.vacate(old_slots[i]);
            trace!("removed {:?} at {}", item.key(), old_index);
            changes.push(DocumentChange::removed(item.clone(), old_index));
        }
    }
    let removed = changes.len();

    for (j, item) in next.iter().enumerate() {
        if is_stationary_next(j) {
            continue;
        }
        let new_slot = new_slots[j];
        debug_assert!(!slots.is_occupied(new_slot));

        match previous_positions.get(item.key()) {
            Some(&i) => {
                let old_index = slots.rank(old_slots[i]);
                slots.vacate(old_slots[i]);
                let new_index = slots.rank(new_slot);
                slots.occupy(new_slot);
                trace!("modified {:?} {} -> {}", item.key(), old_index, new_index);
                changes.push(DocumentChange::modified(item.clone(), old_index, new_index));
            }
            None => {
                let new_index = slots.rank(new_slot);
                slots.occupy(new_slot);
                trace!("added {:?} at {}", item.key(), new_index);
                changes.push(DocumentChange::added(item.clone(), new_index));
            }
        }
    }

    debug!(
        "diffed {} -> {} items: {} changes ({} removed)",
        previous.len(),
        next.len(),
        changes.len(),
        removed
    );

    Ok(changes)
}

/// Returns the changes for a first result set: every item `Added`, in order.
///
/// # Errors
///
/// Returns `Error::InvariantViolation` if `next` contains the same identity
/// key twice.
pub fn initial_changes<T>(next: &[T]) -> Result<Vec<DocumentChange<T>>>
where
    T: Keyed + Clone,
{
    compute_changes(&[], next)
}

/// Builds the identity key -> position map of one result set.
fn position_map<'a, T: Keyed>(
    items: &'a [T],
    sequence: &str,
) -> Result<HashMap<&'a T::Key, usize>> {
    let mut positions = HashMap::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        if positions.insert(item.key(), position).is_some() {
            return Err(Error::duplicate_key(item.key(), sequence));
        }
    }
    Ok(positions)
}

/// Assigns slots as described in the module docs.
///
/// Returns the old slot of every previous item, the new slot of every next
/// item (`NO_SLOT` for stationary ones), and the initial occupancy map.
fn layout_slots(
    stationary: &[bool],
    next_len: usize,
    is_stationary_next: impl Fn(usize) -> bool,
) -> (Vec<usize>, Vec<usize>, Vec<bool>) {
    let mut old_slots = Vec::with_capacity(stationary.len());
    let mut new_slots = vec![NO_SLOT; next_len];
    let mut occupied = Vec::with_capacity(stationary.len() + next_len);

    // Cursor over `next`; runs of non-stationary items follow each anchor.
    let mut j = 0;
    let mut place_run = |j: &mut usize, occupied: &mut Vec<bool>| {
        while *j < next_len && !is_stationary_next(*j) {
            new_slots[*j] = occupied.len();
            occupied.push(false);
            *j += 1;
        }
    };

    place_run(&mut j, &mut occupied);
    for (i, &anchor) in stationary.iter().enumerate() {
        old_slots.push(occupied.len());
        occupied.push(true);
        if anchor {
            debug_assert_eq!(j, i);
            j = i + 1;
            place_run(&mut j, &mut occupied);
        }
    }
    debug_assert_eq!(j, next_len);

    (old_slots, new_slots, occupied)
}
