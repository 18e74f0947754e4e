//! Unified error handling for cart operations.
//!
//! Malformed persisted state and missing display sinks are recovered
//! silently inside the engine and never surface here; only failures of the
//! storage medium itself (and the serialization step in front of it) reach
//! the caller.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The storage medium failed. Propagates unrecovered; state persisted
    /// by prior successful saves is unaffected.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart could not be serialized for persistence.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
