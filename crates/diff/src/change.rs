//! Change records produced by the diff engine.
//!
//! A `DocumentChange` describes one replayable transition of an ordered result
//! set: which item changed, how, and where to splice it.

use core::fmt;

/// How an item changed between two result sets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeKind {
    /// The item is new in the result set.
    Added,
    /// The item left the result set.
    Removed,
    /// The item stayed but its content or position changed.
    Modified,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeKind::Added => "added",
            ChangeKind::Removed => "removed",
            ChangeKind::Modified => "modified",
        };
        f.write_str(name)
    }
}

/// One atomic, replayable transition of an ordered result set.
///
/// Replaying a record means: remove the element at `old_index` if it is
/// `Some`, then insert `item` at `new_index` if it is `Some`. Both indices are
/// positions in the list as it stands after every earlier record of the same
/// batch has been replayed, not absolute positions in either result set.
///
/// `old_index` is `None` exactly for `Added` records and `new_index` is `None`
/// exactly for `Removed` records. The constructor does not check this; the diff
/// engine is the only producer of consistent records.
///
/// For `Removed` records `item` is the last known state of the item, i.e. the
/// version from the previous result set.
#[derive(Clone, Debug)]
pub struct DocumentChange<T> {
    kind: ChangeKind,
    item: T,
    old_index: Option<usize>,
    new_index: Option<usize>,
}

impl<T> DocumentChange<T> {
    /// Creates a change record.
    #[inline]
    pub fn new(kind: ChangeKind, item: T, old_index: Option<usize>, new_index: Option<usize>) -> Self {
        Self {
            kind,
            item,
            old_index,
            new_index,
        }
    }

    /// Creates an `Added` record inserting at `new_index`.
    #[inline]
    pub fn added(item: T, new_index: usize) -> Self {
        Self::new(ChangeKind::Added, item, None, Some(new_index))
    }

    /// Creates a `Removed` record removing at `old_index`.
    #[inline]
    pub fn removed(item: T, old_index: usize) -> Self {
        Self::new(ChangeKind::Removed, item, Some(old_index), None)
    }

    /// Creates a `Modified` record moving from `old_index` to `new_index`.
    #[inline]
    pub fn modified(item: T, old_index: usize, new_index: usize) -> Self {
        Self::new(ChangeKind::Modified, item, Some(old_index), Some(new_index))
    }

    /// Returns the change kind.
    #[inline]
    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    /// Returns the affected item.
    #[inline]
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Consumes the record and returns the affected item.
    #[inline]
    pub fn into_item(self) -> T {
        self.item
    }

    /// Returns the replay position to remove from, if any.
    #[inline]
    pub fn old_index(&self) -> Option<usize> {
        self.old_index
    }

    /// Returns the replay position to insert at, if any.
    #[inline]
    pub fn new_index(&self) -> Option<usize> {
        self.new_index
    }

    /// Returns `old_index` with `-1` standing in for `None`.
    #[inline]
    pub fn old_index_signed(&self) -> i64 {
        signed(self.old_index)
    }

    /// Returns `new_index` with `-1` standing in for `None`.
    #[inline]
    pub fn new_index_signed(&self) -> i64 {
        signed(self.new_index)
    }

    #[inline]
    pub fn is_added(&self) -> bool {
        self.kind == ChangeKind::Added
    }

    #[inline]
    pub fn is_removed(&self) -> bool {
        self.kind == ChangeKind::Removed
    }

    #[inline]
    pub fn is_modified(&self) -> bool {
        self.kind == ChangeKind::Modified
    }

    /// Maps the item to a new type, keeping kind and indices.
    #[inline]
    pub fn map<U, F>(self, f: F) -> DocumentChange<U>
    where
        F: FnOnce(T) -> U,
    {
        DocumentChange {
            kind: self.kind,
            item: f(self.item),
            old_index: self.old_index,
            new_index: self.new_index,
        }
    }
}

#[inline]
fn signed(index: Option<usize>) -> i64 {
    index.map_or(-1, |i| i as i64)
}

/// Records are equal when kind and both indices match and the items are equal
/// under the item type's own `PartialEq`.
impl<T: PartialEq> PartialEq for DocumentChange<T> {
    fn eq(&self, other: &Self) -> bool {
        if core::ptr::eq(self, other) {
            return true;
        }
        self.kind == other.kind
            && self.old_index == other.old_index
            && self.new_index == other.new_index
            && self.item == other.item
    }
}

impl<T: Eq> Eq for DocumentChange<T> {}
