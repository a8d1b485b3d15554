//! Database engine for popreg
//!
//! Ties storage, concurrency and durability together behind [`Database`]:
//! open/recover, closure-based transactions with conflict retry, point and
//! history reads, configuration and shutdown.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod database;

pub use config::{Limits, PopregConfig, CONFIG_FILE_NAME};
pub use database::{Database, LOCK_FILE_NAME, WAL_FILE_NAME};
pub use popreg_concurrency::{CommitInfo, TransactionContext};
pub use popreg_durability::DurabilityMode;
