//! Durability layer for popreg
//!
//! Write-ahead log of committed transactions, replayed on open to rebuild
//! the in-memory versioned store.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod wal;

pub use wal::{DurabilityMode, Wal, WalRecord, WalReplay};
