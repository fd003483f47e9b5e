//! Error types for positional list operations.

use thiserror::Error;

/// Result type alias using ListError.
pub type Result<T> = std::result::Result<T, ListError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("list is empty")]
    Empty,

    #[error("list is full ({max} elements)")]
    CapacityExceeded { max: usize },
}
