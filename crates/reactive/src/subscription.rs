//! Snapshot listeners attached to one observable query.
//!
//! Listeners hear each delivered snapshot in the order they subscribed, so a
//! listener that mirrors the result into a local list always runs after the
//! ones registered before it.

use crate::snapshot::QuerySnapshot;
use alloc::boxed::Box;
use alloc::vec::Vec;
use log::{debug, trace};

/// Unique identifier for a subscription. Never reused by one manager.
pub type SubscriptionId = u64;

/// Callback type for snapshot notifications.
pub type SnapshotCallback<T> = Box<dyn Fn(&QuerySnapshot<T>)>;

/// The listeners of one query, kept in subscription order.
pub struct SubscriptionManager<T> {
    listeners: Vec<(SubscriptionId, SnapshotCallback<T>)>,
    next_id: SubscriptionId,
}

impl<T> Default for SubscriptionManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SubscriptionManager<T> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    /// Adds a listener and returns the ID that removes it again.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&QuerySnapshot<T>) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(callback)));
        debug!("subscription {} added ({} total)", id, self.listeners.len());
        id
    }

    /// Removes a listener. Returns false if `id` is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        match self.listeners.iter().position(|(sid, _)| *sid == id) {
            Some(index) => {
                // `remove` keeps the remaining listeners in order.
                self.listeners.remove(index);
                debug!("subscription {} removed", id);
                true
            }
            None => false,
        }
    }

    /// Hands `snapshot` to every listener, oldest subscription first.
    pub fn notify_all(&self, snapshot: &QuerySnapshot<T>) {
        trace!(
            "delivering {} changes to {} listeners",
            snapshot.len(),
            self.listeners.len()
        );
        for (_, callback) in &self.listeners {
            callback(snapshot);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
