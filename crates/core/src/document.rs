//! Document structure for docview.
//!
//! This module defines the `Document` struct which represents one record of a
//! query result, addressed by its `DocumentKey`.

use crate::keyed::Keyed;
use crate::value::Value;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;

/// Slash-separated path that names a document, e.g. `rooms/eros/messages/1`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentKey(String);

impl DocumentKey {
    /// Creates a key from a document path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the full path.
    #[inline]
    pub fn path(&self) -> &str {
        &self.0
    }

    /// Returns the last path segment.
    pub fn id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }

    /// Returns the path of the collection containing this document.
    pub fn collection_path(&self) -> &str {
        match self.0.rfind('/') {
            Some(pos) => &self.0[..pos],
            None => "",
        }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentKey {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for DocumentKey {
    fn from(path: String) -> Self {
        Self(path)
    }
}

/// A document in a query result.
#[derive(Clone, Debug)]
pub struct Document {
    /// Stable identity of this document.
    key: DocumentKey,
    /// Version number assigned by the store. Bumped on each write.
    version: u64,
    /// Field values by name.
    fields: BTreeMap<String, Value>,
}

impl Document {
    /// Creates a new document with the given key and fields.
    /// Version defaults to 1 for new documents.
    pub fn new(key: impl Into<DocumentKey>, fields: BTreeMap<String, Value>) -> Self {
        Self {
            key: key.into(),
            version: 1,
            fields,
        }
    }

    /// Creates a new document with the given key, version, and fields.
    pub fn new_with_version(
        key: impl Into<DocumentKey>,
        version: u64,
        fields: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            key: key.into(),
            version,
            fields,
        }
    }

    /// Creates a document from `(name, value)` pairs.
    pub fn from_fields<I, S, V>(key: impl Into<DocumentKey>, fields: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<Value>,
    {
        let fields = fields
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        Self::new(key, fields)
    }

    /// Returns the document key.
    #[inline]
    pub fn key(&self) -> &DocumentKey {
        &self.key
    }

    /// Returns the version number.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Sets the version number.
    #[inline]
    pub fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    /// Returns all fields.
    #[inline]
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// Gets a field value by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Sets a field value and bumps the version. Returns the previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.version = self.version.wrapping_add(1);
        self.fields.insert(field.into(), value.into())
    }

    /// Removes a field and bumps the version if it existed.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        let removed = self.fields.remove(field);
        if removed.is_some() {
            self.version = self.version.wrapping_add(1);
        }
        removed
    }

    /// Returns the number of fields in this document.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if this document has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.version == other.version && self.fields == other.fields
    }
}

impl Eq for Document {}

impl Keyed for Document {
    type Key = DocumentKey;

    #[inline]
    fn key(&self) -> &DocumentKey {
        &self.key
    }

    /// Field data only; a version bump that leaves every field intact is not
    /// a content change.
    fn payload_eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}
