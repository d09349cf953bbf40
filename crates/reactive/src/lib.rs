//! docview Reactive - Snapshot listeners for docview.
//!
//! This crate keeps a client-side ordered view of a continuously running
//! query in sync. Each time the transport delivers a new ordered result, the
//! listener diffs it against the previously delivered one and hands
//! subscribers a snapshot with replayable change records (added, removed,
//! modified).
//!
//! # Core Concepts
//!
//! - `QuerySnapshot`: The ordered result plus the change records leading to it
//! - `ObservableQuery`: Holds the last result and notifies subscribers
//! - `SubscriptionManager`: Delivers snapshots to listeners in subscription order
//! - `QueryRegistry`: Routes results for a target to the listening queries
//! - `ListenOptions`: Controls initial and empty snapshot delivery
//!
//! # Key Features
//!
//! - `subscribe()`: Receive each snapshot through a callback
//! - `changes()`: Pull the initial result, then incremental snapshots
//!
//! # Example
//!
//! ```rust
//! use docview_core::Document;
//! use docview_reactive::{ChangeKind, ObservableQuery};
//!
//! let mut query: ObservableQuery<Document> = ObservableQuery::new(1);
//!
//! query.subscribe(|snapshot| {
//!     let _removed = snapshot.count_of(ChangeKind::Removed);
//! });
//!
//! let a = Document::from_fields("tasks/a", [("done", false)]);
//! let b = Document::from_fields("tasks/b", [("done", false)]);
//!
//! query.on_snapshot(vec![a.clone(), b.clone()]).unwrap();
//! let snapshot = query.on_snapshot(vec![b]).unwrap();
//!
//! assert_eq!(snapshot.count_of(ChangeKind::Removed), 1);
//! ```

#![no_std]

extern crate alloc;

pub mod notify;
pub mod observable;
pub mod options;
pub mod snapshot;
pub mod subscription;

pub use notify::{QueryId, QueryRegistry, TargetId};
pub use observable::{Changes, ObservableQuery};
pub use options::ListenOptions;
pub use snapshot::QuerySnapshot;
pub use subscription::{SnapshotCallback, SubscriptionId, SubscriptionManager};

// Re-export commonly used types from dependencies
pub use docview_core::{Document, DocumentKey, Error, Keyed, Result, Value};
pub use docview_diff::{ChangeKind, DocumentChange};
