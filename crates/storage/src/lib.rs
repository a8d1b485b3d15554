//! Storage layer for popreg
//!
//! In-memory versioned key-value backend: every key holds an append-only
//! chain of committed versions.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chain;
pub mod sharded;

pub use chain::VersionChain;
pub use sharded::{Shard, ShardedStore};
