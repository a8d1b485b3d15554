//! Read-side storage trait
//!
//! Implemented by the versioned backend. Transactions and the history
//! iterator read through this trait; writes go through the commit path only.

use crate::{Key, StoreResult, VersionedValue};

/// Versioned key-value storage
///
/// Each key maps to an append-only chain of versions. Position 0 is the
/// oldest version; the last position is the current value.
pub trait Storage: Send + Sync {
    /// Current value of a key, or None if the key was never written
    fn get(&self, key: &Key) -> StoreResult<Option<VersionedValue>>;

    /// Value at a history position, or None past the end of the chain
    fn get_at(&self, key: &Key, position: usize) -> StoreResult<Option<VersionedValue>>;

    /// Number of versions committed for a key (0 if never written)
    fn history_len(&self, key: &Key) -> StoreResult<usize>;

    /// Latest committed global version
    fn current_version(&self) -> u64;
}
