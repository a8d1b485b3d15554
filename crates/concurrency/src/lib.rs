//! Optimistic concurrency control for popreg
//!
//! - `transaction`: TransactionContext (read set, buffered write set)
//! - `validation`: read-set conflict detection
//! - `manager`: serialized validate-log-apply commit path

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod manager;
pub mod transaction;
pub mod validation;

pub use manager::{CommitInfo, TransactionManager};
pub use transaction::TransactionContext;
pub use validation::{validate_read_set, ConflictType, ValidationResult};
