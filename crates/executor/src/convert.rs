//! Error conversion from backend errors.
//!
//! Maps [`StoreError`] onto the executor's [`Error`]. Record keys are
//! reported by passport number only; the storage space is dropped.

use crate::Error;
use popreg_core::StoreError;

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { key } => Error::NotFound {
                key: key.name().to_string(),
            },

            StoreError::AlreadyExists { key } => Error::AlreadyExists {
                key: key.name().to_string(),
            },

            StoreError::Corruption {
                key,
                position,
                message,
            } => Error::CorruptRecord {
                key: key.name().to_string(),
                position,
                reason: message,
            },

            // Retry budget exhausted in the engine
            StoreError::Conflict { key } => Error::Conflict {
                reason: format!("write conflict on {}", key),
            },

            StoreError::Unavailable { message } => Error::BackendUnavailable { reason: message },

            StoreError::Storage { message, source } => {
                let reason = if let Some(ref src) = source {
                    format!("{}: {}", message, src)
                } else {
                    message
                };
                Error::BackendUnavailable { reason }
            }

            StoreError::InvalidInput { message } => Error::InvalidInput { reason: message },

            StoreError::Serialization { message } => Error::Serialization { reason: message },

            StoreError::Internal { message } => Error::Internal { reason: message },
        }
    }
}

/// Convert a backend result to an executor result.
pub fn convert_result<T>(result: popreg_core::StoreResult<T>) -> crate::Result<T> {
    result.map_err(Error::from)
}
