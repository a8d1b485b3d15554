//! Request-level errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias for executor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned to registry callers
///
/// `AlreadyExists`, `NotFound` and `InvalidInput` are caller-correctable.
/// `CorruptRecord` means stored data does not decode and is never reported
/// as absence. `BackendUnavailable` is not retried.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "error")]
pub enum Error {
    /// Create on a passport number that already has a record
    #[error("record already exists: {key}")]
    AlreadyExists {
        /// Passport number
        key: String,
    },

    /// Read, update or history on a passport number with no record
    #[error("record not found: {key}")]
    NotFound {
        /// Passport number
        key: String,
    },

    /// Stored payload failed to decode
    #[error("corrupt record {key}{}: {reason}", .position.map(|p| format!(" at history position {p}")).unwrap_or_default())]
    CorruptRecord {
        /// Passport number
        key: String,
        /// History position of the bad version, None for a current-value read
        position: Option<u64>,
        /// Decoder message
        reason: String,
    },

    /// The backend failed to respond or is shut down
    #[error("backend unavailable: {reason}")]
    BackendUnavailable {
        /// Cause
        reason: String,
    },

    /// Concurrent writers kept colliding past the retry budget
    #[error("conflict: {reason}")]
    Conflict {
        /// Cause
        reason: String,
    },

    /// Request failed validation
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Cause
        reason: String,
    },

    /// Record could not be encoded
    #[error("serialization error: {reason}")]
    Serialization {
        /// Cause
        reason: String,
    },

    /// Bug or unexpected state
    #[error("internal error: {reason}")]
    Internal {
        /// Cause
        reason: String,
    },
}
