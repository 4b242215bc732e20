//! Error types for chipflow core.

use thiserror::Error;

/// Errors that can occur during object operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    /// The object ID is invalid or has been destroyed.
    #[error("invalid or destroyed object ID")]
    InvalidObjectId,

    /// Attempted to set an object as its own parent/ancestor.
    #[error("cannot set an object as its own parent or ancestor")]
    CircularParentage,
}

/// Result type for object operations.
pub type ObjectResult<T> = std::result::Result<T, ObjectError>;
