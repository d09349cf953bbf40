//! Replaying change records against a locally held list.

use crate::change::DocumentChange;
use alloc::vec::Vec;
use docview_core::{Error, Result};

/// Applies `changes` in order to `list`.
///
/// For each record the element at `old_index` is removed (if present), then
/// the record's item is inserted at `new_index` (if present). Applied to a copy
/// of the previous result set, the output of `compute_changes` reproduces the
/// next result set.
///
/// # Errors
///
/// Returns `Error::IndexOutOfBounds` if a record points outside the list. The
/// records before the failing one stay applied.
pub fn apply_changes<T: Clone>(list: &mut Vec<T>, changes: &[DocumentChange<T>]) -> Result<()> {
    for change in changes {
        apply_change(list, change)?;
    }
    Ok(())
}

/// Applies a single change record to `list`.
///
/// Both indices are checked before the list is touched, so a failing record
/// leaves `list` unchanged.
pub fn apply_change<T: Clone>(list: &mut Vec<T>, change: &DocumentChange<T>) -> Result<()> {
    if let Some(old_index) = change.old_index() {
        if old_index >= list.len() {
            return Err(Error::index_out_of_bounds(old_index, list.len()));
        }
    }
    if let Some(new_index) = change.new_index() {
        // Length seen by the insert, after the removal above.
        let len = list.len() - usize::from(change.old_index().is_some());
        if new_index > len {
            return Err(Error::index_out_of_bounds(new_index, len));
        }
    }

    if let Some(old_index) = change.old_index() {
        list.remove(old_index);
    }
    if let Some(new_index) = change.new_index() {
        list.insert(new_index, change.item().clone());
    }
    Ok(())
}
