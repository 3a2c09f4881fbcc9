//! Error types for tola-htmldiff.
//!
//! Malformed HTML is never an error: the tokenizer is lenient. The only
//! failure a caller can trigger is handing in an absent token sequence.

use std::fmt;

use thiserror::Error;

/// Which side of a diff a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The "before" document
    Before,
    /// The "after" document
    After,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => f.write_str("before"),
            Self::After => f.write_str("after"),
        }
    }
}

/// Errors that can occur while computing a diff.
#[derive(Debug, Error)]
pub enum DiffError {
    /// A token sequence was absent where one is required
    #[error("invalid argument: missing {side} tokens")]
    MissingTokens {
        /// Side whose tokens were missing
        side: Side,
    },
}

/// Result type alias for diff operations.
pub type DiffResult<T> = Result<T, DiffError>;

impl DiffError {
    /// Create a missing-tokens error for the given side.
    pub fn missing(side: Side) -> Self {
        Self::MissingTokens { side }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DiffError::missing(Side::Before);
        assert_eq!(err.to_string(), "invalid argument: missing before tokens");

        let err = DiffError::MissingTokens { side: Side::After };
        assert_eq!(err.to_string(), "invalid argument: missing after tokens");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DiffError>();
    }
}
