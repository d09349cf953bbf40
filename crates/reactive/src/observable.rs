//! Observable query implementation.
//!
//! This module provides `ObservableQuery` which holds the last delivered
//! ordered result of a listened-to query, diffs each new result against it,
//! and notifies subscribers with the resulting `QuerySnapshot`.
//!
//! The `changes()` method returns a cursor that yields the initial result
//! followed by incremental snapshots, without going through subscribers.

use crate::notify::TargetId;
use crate::options::ListenOptions;
use crate::snapshot::QuerySnapshot;
use crate::subscription::{SubscriptionId, SubscriptionManager};
use alloc::vec::Vec;
use docview_core::{Keyed, Result};
use docview_diff::compute_changes;
use log::debug;

/// An observable query that tracks its ordered result and notifies subscribers.
///
/// Updates for one query are serialized through `&mut self`: the stored
/// result is only replaced once a new result has been diffed successfully.
///
/// # Example
///
/// ```rust
/// use docview_core::Document;
/// use docview_reactive::ObservableQuery;
///
/// let mut query: ObservableQuery<Document> = ObservableQuery::new(1);
///
/// query.subscribe(|snapshot| {
///     for change in &snapshot.changes {
///         let _ = (change.kind(), change.old_index(), change.new_index());
///     }
/// });
///
/// let first = vec![Document::from_fields("rooms/a", [("n", 1i64)])];
/// let snapshot = query.on_snapshot(first).unwrap();
/// assert_eq!(snapshot.len(), 1);
/// ```
pub struct ObservableQuery<T> {
    /// Transport target this query listens to
    target: TargetId,
    /// The last delivered ordered result
    documents: Vec<T>,
    /// Subscription manager for snapshot notifications
    subscriptions: SubscriptionManager<T>,
    /// Delivery options
    options: ListenOptions,
    /// Whether a first result has been received
    initialized: bool,
}

impl<T: Keyed + Clone> ObservableQuery<T> {
    /// Creates a new observable query for the given target.
    pub fn new(target: TargetId) -> Self {
        Self::with_options(target, ListenOptions::default())
    }

    /// Creates a new observable query with explicit delivery options.
    pub fn with_options(target: TargetId, options: ListenOptions) -> Self {
        Self {
            target,
            documents: Vec::new(),
            subscriptions: SubscriptionManager::new(),
            options,
            initialized: false,
        }
    }

    /// Creates an observable query that already holds a result.
    ///
    /// No snapshot is delivered for `initial`; the next result is diffed
    /// against it.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvariantViolation` if `initial` repeats an identity key.
    pub fn with_initial(target: TargetId, initial: Vec<T>) -> Result<Self> {
        compute_changes(&[], &initial)?;
        Ok(Self {
            target,
            documents: initial,
            subscriptions: SubscriptionManager::new(),
            options: ListenOptions::default(),
            initialized: true,
        })
    }

    /// Returns the target this query listens to.
    #[inline]
    pub fn target(&self) -> TargetId {
        self.target
    }

    /// Returns the delivery options.
    #[inline]
    pub fn options(&self) -> ListenOptions {
        self.options
    }

    /// Returns the current ordered result.
    #[inline]
    pub fn documents(&self) -> &[T] {
        &self.documents
    }

    /// Returns the number of documents in the result.
    #[inline]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if the result is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns whether a first result has been received.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Subscribes to snapshots with the given callback.
    ///
    /// Returns a subscription ID that can be used to unsubscribe.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&QuerySnapshot<T>) + 'static,
    {
        self.subscriptions.subscribe(callback)
    }

    /// Unsubscribes by ID.
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.unsubscribe(id)
    }

    /// Returns the number of subscriptions.
    #[inline]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Handles a new ordered result from the transport.
    ///
    /// Diffs `next` against the stored result, stores `next`, and notifies
    /// all subscribers. The first result is reported as all additions unless
    /// the options say otherwise.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvariantViolation` if `next` repeats an identity key.
    /// The stored result is left untouched and nobody is notified.
    pub fn on_snapshot(&mut self, next: Vec<T>) -> Result<QuerySnapshot<T>> {
        let first = !self.initialized;
        let changes = if first && !self.options.includes_initial() {
            // Still validate identity uniqueness before accepting the result.
            compute_changes(&[], &next)?;
            Vec::new()
        } else {
            compute_changes(&self.documents, &next)?
        };

        self.documents = next.clone();
        self.initialized = true;
        let snapshot = QuerySnapshot::from_changes(next, changes);

        debug!(
            "target {}: {} documents, {} changes{}",
            self.target,
            snapshot.size(),
            snapshot.len(),
            if first { " (initial)" } else { "" }
        );

        if !snapshot.is_empty() || self.options.notifies_empty() {
            self.subscriptions.notify_all(&snapshot);
        }
        Ok(snapshot)
    }

    /// Creates a `Changes` cursor that yields the initial result followed by
    /// incremental snapshots.
    ///
    /// The cursor updates the stored result but does not notify subscribers.
    pub fn changes(&mut self) -> Changes<'_, T> {
        Changes {
            query: self,
            emitted_initial: false,
        }
    }

    /// Clears the result and resets the query.
    ///
    /// The next result is treated as a first result again.
    pub fn clear(&mut self) {
        self.documents.clear();
        self.initialized = false;
    }
}

/// A cursor for pulling query snapshots.
///
/// The first call to `initial()` returns the current result as a snapshot with
/// every document `Added`. `process()` diffs and stores subsequent results.
pub struct Changes<'a, T> {
    query: &'a mut ObservableQuery<T>,
    emitted_initial: bool,
}

impl<'a, T: Keyed + Clone> Changes<'a, T> {
    /// Gets the initial snapshot (all current documents as additions).
    ///
    /// Every call after the first returns the current result without changes.
    pub fn initial(&mut self) -> Result<QuerySnapshot<T>> {
        if self.emitted_initial {
            return Ok(QuerySnapshot::result_only(self.query.documents.clone()));
        }
        self.emitted_initial = true;
        QuerySnapshot::initial(self.query.documents.clone())
    }

    /// Diffs `next` against the stored result, stores it, and returns the
    /// snapshot.
    pub fn process(&mut self, next: Vec<T>) -> Result<QuerySnapshot<T>> {
        let changes = compute_changes(&self.query.documents, &next)?;
        self.query.documents = next.clone();
        self.query.initialized = true;
        Ok(QuerySnapshot::from_changes(next, changes))
    }

    /// Returns the current ordered result.
    #[inline]
    pub fn documents(&self) -> &[T] {
        self.query.documents()
    }
}
