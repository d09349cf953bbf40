//! Error types for docview.

use alloc::format;
use alloc::string::String;
use core::fmt;

/// Result type alias for docview operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for docview operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// An input broke a caller-side contract, e.g. a sequence carrying the
    /// same identity key twice.
    InvariantViolation {
        message: String,
    },
    /// A change record pointed outside the list it was replayed against.
    IndexOutOfBounds {
        index: usize,
        len: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvariantViolation { message } => {
                write!(f, "Invariant violation: {}", message)
            }
            Error::IndexOutOfBounds { index, len } => {
                write!(f, "Index {} out of bounds for list of length {}", index, len)
            }
        }
    }
}

impl Error {
    /// Creates an invariant violation error.
    pub fn invariant_violation(message: impl Into<String>) -> Self {
        Error::InvariantViolation {
            message: message.into(),
        }
    }

    /// Creates the invariant violation raised for a repeated identity key.
    ///
    /// `sequence` names the input the key was found in ("previous" or "next").
    pub fn duplicate_key(key: &impl fmt::Debug, sequence: &str) -> Self {
        Error::InvariantViolation {
            message: format!("duplicate identity key {:?} in {} sequence", key, sequence),
        }
    }

    /// Creates an index out of bounds error.
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Error::IndexOutOfBounds { index, len }
    }

    /// Returns true if this is an invariant violation.
    #[inline]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Error::InvariantViolation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        let err = Error::invariant_violation("bad input");
        assert!(err.to_string().contains("Invariant violation"));
        assert!(err.to_string().contains("bad input"));

        let err = Error::index_out_of_bounds(5, 3);
        assert_eq!(err.to_string(), "Index 5 out of bounds for list of length 3");
    }

    #[test]
    fn test_duplicate_key_names_key() {
        let err = Error::duplicate_key(&"rooms/a", "next");
        assert!(err.is_invariant_violation());
        match err {
            Error::InvariantViolation { message } => {
                assert!(message.contains("\"rooms/a\""));
                assert!(message.contains("next"));
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_error_constructors() {
        let err = Error::index_out_of_bounds(1, 0);
        assert!(!err.is_invariant_violation());
        assert_eq!(err, Error::IndexOutOfBounds { index: 1, len: 0 });
    }
}
