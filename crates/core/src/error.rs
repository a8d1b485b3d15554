//! Backend error taxonomy
//!
//! `StoreError` is the single error type produced below the request surface.
//! The executor maps it onto caller-facing categories in one place.

use crate::Key;
use thiserror::Error;

/// Result type for backend and record-service operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors produced by the versioned backend and the record service
#[derive(Debug, Error)]
pub enum StoreError {
    /// Key has no current value
    #[error("not found: {key}")]
    NotFound {
        /// The missing key
        key: Key,
    },

    /// Create on a key that already has a current value
    #[error("already exists: {key}")]
    AlreadyExists {
        /// The existing key
        key: Key,
    },

    /// A stored value could not be decoded
    ///
    /// `position` is the 0-based history position when the corrupt value was
    /// reached through history enumeration, `None` for the current value.
    #[error("corrupt value at {key}{}: {message}", .position.map(|p| format!(" (history position {p})")).unwrap_or_default())]
    Corruption {
        /// Key holding the corrupt value
        key: Key,
        /// History position, if known
        position: Option<u64>,
        /// Decoder message
        message: String,
    },

    /// A value could not be encoded for storage
    #[error("serialization failed: {message}")]
    Serialization {
        /// Encoder message
        message: String,
    },

    /// Optimistic validation failed at commit
    #[error("write conflict on {key}")]
    Conflict {
        /// First conflicting key
        key: Key,
    },

    /// Backend is shut down or otherwise not serving requests
    #[error("backend unavailable: {message}")]
    Unavailable {
        /// Reason
        message: String,
    },

    /// Caller-supplied input was rejected
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Reason
        message: String,
    },

    /// I/O failure in the storage layer
    #[error("storage error: {message}")]
    Storage {
        /// Context
        message: String,
        /// Underlying I/O error
        #[source]
        source: Option<std::io::Error>,
    },

    /// Invariant violation inside the backend
    #[error("internal error: {message}")]
    Internal {
        /// Reason
        message: String,
    },
}

impl StoreError {
    /// Key not found
    pub fn not_found(key: Key) -> Self {
        StoreError::NotFound { key }
    }

    /// Key already exists
    pub fn already_exists(key: Key) -> Self {
        StoreError::AlreadyExists { key }
    }

    /// Corrupt current value
    pub fn corruption(key: Key, message: impl Into<String>) -> Self {
        StoreError::Corruption {
            key,
            position: None,
            message: message.into(),
        }
    }

    /// Corrupt value at a history position
    pub fn corruption_at(key: Key, position: u64, message: impl Into<String>) -> Self {
        StoreError::Corruption {
            key,
            position: Some(position),
            message: message.into(),
        }
    }

    /// Encoding failure
    pub fn serialization(message: impl Into<String>) -> Self {
        StoreError::Serialization {
            message: message.into(),
        }
    }

    /// Commit-time conflict
    pub fn conflict(key: Key) -> Self {
        StoreError::Conflict { key }
    }

    /// Backend not serving
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            message: message.into(),
        }
    }

    /// Rejected input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        StoreError::InvalidInput {
            message: message.into(),
        }
    }

    /// I/O failure with context
    pub fn storage(message: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Storage {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Internal invariant violation
    pub fn internal(message: impl Into<String>) -> Self {
        StoreError::Internal {
            message: message.into(),
        }
    }

    /// Whether this is a commit-time conflict that may succeed on retry
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }

    /// Whether this is a `NotFound` error
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Whether this is an `AlreadyExists` error
    pub fn is_already_exists(&self) -> bool {
        matches!(self, StoreError::AlreadyExists { .. })
    }
}
