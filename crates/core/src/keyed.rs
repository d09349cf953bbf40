//! Identity and payload capabilities required from diffable items.

use core::fmt::Debug;
use core::hash::Hash;

/// An item that can be matched across two versions of an ordered result set.
///
/// `key` must be unique within one sequence and stable across versions that
/// describe the same underlying record. `payload_eq` decides whether two
/// versions of that record carry the same content; the diff engine never
/// inspects the content itself.
pub trait Keyed {
    /// Stable identity handle.
    type Key: Eq + Hash + Debug;

    /// Returns the identity key.
    fn key(&self) -> &Self::Key;

    /// Returns true if `other` carries the same content as `self`.
    fn payload_eq(&self, other: &Self) -> bool;
}

/// Key-value pairs diff by their first element and compare by their second.
impl<K, V> Keyed for (K, V)
where
    K: Eq + Hash + Debug,
    V: PartialEq,
{
    type Key = K;

    #[inline]
    fn key(&self) -> &K {
        &self.0
    }

    #[inline]
    fn payload_eq(&self, other: &Self) -> bool {
        self.1 == other.1
    }
}
