//! docview Core - Core types for docview.
//!
//! This crate provides the foundational types shared by the diff engine and
//! the listener layer:
//!
//! - `Keyed`: The identity/payload capability every diffable item provides
//! - `Document`: A keyed record of named field values
//! - `DocumentKey`: The slash-separated path that identifies a document
//! - `Value`: Runtime values stored in document fields
//! - `Error`: Error types for docview operations
//!
//! # Example
//!
//! ```rust
//! use docview_core::{Document, Keyed, Value};
//!
//! let before = Document::from_fields("rooms/eros", [("topic", "rust")]);
//! let after = Document::from_fields("rooms/eros", [("topic", "rust!")]);
//!
//! assert_eq!(before.key(), after.key());
//! assert!(!before.payload_eq(&after));
//! assert_eq!(after.get("topic"), Some(&Value::String("rust!".into())));
//! ```

#![no_std]

extern crate alloc;

mod document;
mod error;
mod keyed;
mod value;

pub use document::{Document, DocumentKey};
pub use error::{Error, Result};
pub use keyed::Keyed;
pub use value::Value;
