//! Query snapshots delivered to listeners.
//!
//! A QuerySnapshot pairs the complete ordered result of a query with the
//! change records that lead to it from the previously delivered result.

use alloc::vec::Vec;
use docview_core::{Keyed, Result};
use docview_diff::{initial_changes, ChangeKind, DocumentChange};

/// One delivery of a listened-to query.
///
/// This struct carries:
/// - `documents`: The complete ordered result after applying changes
/// - `changes`: Replayable change records, in emission order
#[derive(Clone, Debug)]
pub struct QuerySnapshot<T> {
    /// The complete ordered result after applying changes
    pub documents: Vec<T>,
    /// Change records from the previous result to `documents`
    pub changes: Vec<DocumentChange<T>>,
}

impl<T> Default for QuerySnapshot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> QuerySnapshot<T> {
    /// Creates an empty snapshot.
    #[inline]
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            changes: Vec::new(),
        }
    }

    /// Creates a snapshot from a result and the changes that produced it.
    #[inline]
    pub fn from_changes(documents: Vec<T>, changes: Vec<DocumentChange<T>>) -> Self {
        Self { documents, changes }
    }

    /// Creates a snapshot carrying only the result, without change records.
    pub fn result_only(documents: Vec<T>) -> Self {
        Self {
            documents,
            changes: Vec::new(),
        }
    }

    /// Returns true if there are no changes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Returns the total number of changes.
    #[inline]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns the number of documents in the result.
    #[inline]
    pub fn size(&self) -> usize {
        self.documents.len()
    }

    /// Iterates the changes of one kind, in emission order.
    pub fn changes_of(&self, kind: ChangeKind) -> impl Iterator<Item = &DocumentChange<T>> {
        self.changes.iter().filter(move |change| change.kind() == kind)
    }

    /// Returns the number of changes of one kind.
    pub fn count_of(&self, kind: ChangeKind) -> usize {
        self.changes_of(kind).count()
    }
}

impl<T: Keyed + Clone> QuerySnapshot<T> {
    /// Creates a snapshot representing a first result.
    ///
    /// Every document is reported as `Added`.
    pub fn initial(documents: Vec<T>) -> Result<Self> {
        let changes = initial_changes(&documents)?;
        Ok(Self { documents, changes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use docview_core::{Document, Value};

    fn make_doc(path: &str, score: i64) -> Document {
        Document::from_fields(path, [("score", Value::Int64(score))])
    }

    #[test]
    fn test_snapshot_new() {
        let snapshot: QuerySnapshot<Document> = QuerySnapshot::new();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
        assert_eq!(snapshot.size(), 0);
    }

    #[test]
    fn test_snapshot_initial() {
        let docs = vec![make_doc("r/a", 10), make_doc("r/b", 20)];
        let snapshot = QuerySnapshot::initial(docs).unwrap();

        assert_eq!(snapshot.count_of(ChangeKind::Added), 2);
        assert_eq!(snapshot.count_of(ChangeKind::Removed), 0);
        assert_eq!(snapshot.size(), 2);
        assert_eq!(snapshot.changes[1].new_index(), Some(1));
    }

    #[test]
    fn test_snapshot_initial_rejects_duplicates() {
        let docs = vec![make_doc("r/a", 10), make_doc("r/a", 20)];
        assert!(QuerySnapshot::initial(docs).is_err());
    }

    #[test]
    fn test_snapshot_result_only() {
        let snapshot = QuerySnapshot::result_only(vec![make_doc("r/a", 10)]);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.size(), 1);
    }

    #[test]
    fn test_snapshot_changes_of() {
        let snapshot = QuerySnapshot::from_changes(
            vec![make_doc("r/b", 2), make_doc("r/c", 3)],
            vec![
                DocumentChange::removed(make_doc("r/a", 1), 0),
                DocumentChange::modified(make_doc("r/b", 2), 0, 0),
                DocumentChange::added(make_doc("r/c", 3), 1),
            ],
        );

        assert_eq!(snapshot.len(), 3);
        let added: Vec<_> = snapshot.changes_of(ChangeKind::Added).collect();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].item().key().path(), "r/c");
        assert_eq!(snapshot.count_of(ChangeKind::Modified), 1);
    }
}
