//! Core types for popreg
//!
//! This crate defines the foundational types shared by every layer:
//! - Key: space-qualified storage key
//! - Value: opaque stored payload
//! - Versioned: value plus commit metadata (version, timestamp, commit id)
//! - StoreError: backend error taxonomy
//! - Storage: read-side trait implemented by the versioned backend

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;
pub mod value;
pub mod versioned;

pub use error::{StoreError, StoreResult};
pub use traits::Storage;
pub use types::Key;
pub use value::Value;
pub use versioned::{CommitId, Timestamp, Versioned, VersionedValue};
