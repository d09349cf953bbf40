//! Query registry and snapshot routing.
//!
//! This module provides `QueryRegistry` which tracks observable queries and
//! routes each result delivered for a transport target to the queries
//! listening to it.

use crate::observable::ObservableQuery;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use docview_core::{Keyed, Result};
use hashbrown::HashMap;
use log::{debug, warn};

/// Unique identifier for a registered query.
pub type QueryId = u64;

/// Identifier the transport uses for one listened-to query target.
pub type TargetId = u32;

type QueryRef<T> = Weak<RefCell<ObservableQuery<T>>>;

/// A registry that tracks observable queries and routes results to them.
///
/// The registry maps each target to the queries listening to it. Queries are
/// held weakly; dropping the last strong reference effectively unregisters a
/// query, and `cleanup()` reclaims the stale entries.
///
/// # Example
///
/// ```rust
/// use docview_core::Document;
/// use docview_reactive::{ObservableQuery, QueryRegistry};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let mut registry = QueryRegistry::new();
///
/// let query: Rc<RefCell<ObservableQuery<Document>>> =
///     Rc::new(RefCell::new(ObservableQuery::new(1)));
///
/// registry.register(query.clone());
///
/// // Results for target 1 reach the query
/// let delivered = registry
///     .on_snapshot(1, vec![Document::from_fields("rooms/a", [("n", 1i64)])])
///     .unwrap();
/// assert_eq!(delivered, 1);
/// assert_eq!(query.borrow().len(), 1);
/// ```
pub struct QueryRegistry<T> {
    /// Target ID -> queries listening to it
    target_queries: HashMap<TargetId, Vec<QueryRef<T>>>,
    /// Query ID -> query reference (for unregistration)
    queries: HashMap<QueryId, QueryRef<T>>,
    /// Next query ID to assign
    next_id: QueryId,
}

impl<T> Default for QueryRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> QueryRegistry<T> {
    /// Creates a new query registry.
    pub fn new() -> Self {
        Self {
            target_queries: HashMap::new(),
            queries: HashMap::new(),
            next_id: 1,
        }
    }

    /// Returns the number of registered queries.
    pub fn query_count(&self) -> usize {
        self.queries.len()
    }

    /// Returns true if there are no registered queries.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Returns the number of live queries listening to a specific target.
    pub fn queries_for_target(&self, target: TargetId) -> usize {
        self.target_queries
            .get(&target)
            .map(|v| v.iter().filter(|w| w.strong_count() > 0).count())
            .unwrap_or(0)
    }

    /// Cleans up stale weak references.
    pub fn cleanup(&mut self) {
        // Remove stale entries from target_queries
        for queries in self.target_queries.values_mut() {
            queries.retain(|w| w.strong_count() > 0);
        }

        // Remove empty target entries
        self.target_queries.retain(|_, v| !v.is_empty());

        // Remove stale entries from queries map
        self.queries.retain(|_, w| w.strong_count() > 0);
    }

    /// Clears all registered queries.
    pub fn clear(&mut self) {
        self.target_queries.clear();
        self.queries.clear();
    }
}

impl<T: Keyed + Clone> QueryRegistry<T> {
    /// Registers a query and returns its ID.
    ///
    /// The query receives every result delivered for its target.
    pub fn register(&mut self, query: Rc<RefCell<ObservableQuery<T>>>) -> QueryId {
        let id = self.next_id;
        self.next_id += 1;

        let target = query.borrow().target();
        let weak = Rc::downgrade(&query);
        self.target_queries.entry(target).or_default().push(weak.clone());
        self.queries.insert(id, weak);
        debug!("query {} registered for target {}", id, target);

        id
    }

    /// Unregisters a query by ID.
    ///
    /// Returns true if the query was found and removed.
    pub fn unregister(&mut self, query_id: QueryId) -> bool {
        match self.queries.remove(&query_id) {
            Some(removed) => {
                for queries in self.target_queries.values_mut() {
                    queries.retain(|w| !w.ptr_eq(&removed));
                }
                self.cleanup();
                debug!("query {} unregistered", query_id);
                true
            }
            None => false,
        }
    }

    /// Delivers a new result for `target` to every live query listening to it.
    ///
    /// Returns the number of queries that received the result.
    ///
    /// # Errors
    ///
    /// Stops at the first query that rejects the result (a repeated identity
    /// key) and returns its error. Queries that rejected it keep their previous
    /// result; since every query sees the same result, that is the first one.
    pub fn on_snapshot(&self, target: TargetId, documents: Vec<T>) -> Result<usize> {
        let Some(queries) = self.target_queries.get(&target) else {
            debug!("no queries for target {}", target);
            return Ok(0);
        };

        let mut delivered = 0;
        for query_ref in queries {
            if let Some(query) = query_ref.upgrade() {
                if let Err(err) = query.borrow_mut().on_snapshot(documents.clone()) {
                    warn!("target {}: rejected result: {}", target, err);
                    return Err(err);
                }
                delivered += 1;
            }
        }
        Ok(delivered)
    }
}
