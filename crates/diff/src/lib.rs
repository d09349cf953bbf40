//! docview Diff - Ordered result-set change computation for docview.
//!
//! This crate turns two versions of an ordered query result into the list of
//! change records a client needs to update its local copy. Items are matched by
//! stable identity key, never by content alignment, so matching is O(n).
//!
//! # Core Concepts
//!
//! - `DocumentChange<T>`: One added, removed, or modified item with the
//!   positions needed to replay it
//! - `ChangeKind`: Added, Removed, or Modified
//! - `compute_changes`: Diffs two ordered result sets
//! - `apply_changes`: Replays change records against a mutable list
//!
//! # Replay Model
//!
//! Records are replayed in order. For each record the element at `old_index`
//! is removed if present, then the item is inserted at `new_index` if present.
//! Indices are positions at the moment of replay, not absolute positions in
//! either result set.
//!
//! # Example
//!
//! ```rust
//! use docview_core::Document;
//! use docview_diff::{apply_changes, compute_changes};
//!
//! let previous = vec![
//!     Document::from_fields("tasks/1", [("title", "write")]),
//!     Document::from_fields("tasks/2", [("title", "review")]),
//! ];
//! let next = vec![
//!     Document::from_fields("tasks/2", [("title", "review")]),
//!     Document::from_fields("tasks/3", [("title", "ship")]),
//! ];
//!
//! let changes = compute_changes(&previous, &next).unwrap();
//!
//! let mut local = previous.clone();
//! apply_changes(&mut local, &changes).unwrap();
//! assert_eq!(local, next);
//! ```

#![no_std]

extern crate alloc;

pub mod change;
pub mod engine;
pub mod replay;
mod slots;

pub use change::{ChangeKind, DocumentChange};
pub use engine::{compute_changes, initial_changes};
pub use replay::{apply_change, apply_changes};

// Re-export commonly used types from dependencies
pub use docview_core::{Error, Keyed, Result};
