//! Sharded versioned storage
//!
//! DashMap keyed by space, FxHashMap of version chains within each shard.
//!
//! # Design
//!
//! - DashMap: sharded by space, lock-free reads
//! - FxHashMap: O(1) key lookups, fast non-crypto hash
//! - VersionChain: append-only per-key history, positions never shift
//!
//! Writes arrive only through `apply_batch`, which the commit path calls
//! under its commit lock, so all versions in a chain are strictly increasing.

use crate::chain::VersionChain;
use dashmap::DashMap;
use popreg_core::{CommitId, Key, Storage, StoreResult, Timestamp, Value, Versioned, VersionedValue};
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-space shard of version chains
#[derive(Debug, Default)]
pub struct Shard {
    pub(crate) data: FxHashMap<Key, VersionChain>,
}

impl Shard {
    /// Create a new empty shard
    pub fn new() -> Self {
        Self {
            data: FxHashMap::default(),
        }
    }

    /// Number of keys in this shard
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if shard is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Sharded versioned store - DashMap by space, HashMap of chains within
///
/// # Thread Safety
///
/// - get / get_at: read guard on one shard only
/// - apply_batch: write guard on each touched shard in turn
/// - Different spaces never contend
pub struct ShardedStore {
    shards: DashMap<String, Shard>,
    /// Latest committed global version
    version: AtomicU64,
}

impl ShardedStore {
    /// Create new sharded store
    pub fn new() -> Self {
        Self {
            shards: DashMap::new(),
            version: AtomicU64::new(0),
        }
    }

    /// Get current version
    #[inline]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Number of shards (spaces)
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Total number of keys across all shards
    pub fn total_keys(&self) -> usize {
        self.shards.iter().map(|entry| entry.value().len()).sum()
    }

    /// Number of keys in one space
    pub fn space_key_count(&self, space: &str) -> usize {
        self.shards.get(space).map(|shard| shard.len()).unwrap_or(0)
    }

    /// Latest version of a key
    #[inline]
    pub fn latest(&self, key: &Key) -> Option<VersionedValue> {
        self.shards
            .get(key.space())
            .and_then(|shard| shard.data.get(key).and_then(|c| c.latest().cloned()))
    }

    /// Version at a history position
    #[inline]
    pub fn at(&self, key: &Key, position: usize) -> Option<VersionedValue> {
        self.shards
            .get(key.space())
            .and_then(|shard| shard.data.get(key).and_then(|c| c.at(position).cloned()))
    }

    /// Number of versions held for a key
    pub fn chain_len(&self, key: &Key) -> usize {
        self.shards
            .get(key.space())
            .and_then(|shard| shard.data.get(key).map(|c| c.len()))
            .unwrap_or(0)
    }

    /// Append one version per written key
    ///
    /// All writes share the given version, timestamp and commit id. The
    /// global version is raised to `version` if it is behind (replay path).
    pub fn apply_batch(
        &self,
        writes: &[(Key, Value)],
        version: u64,
        timestamp: Timestamp,
        commit_id: CommitId,
    ) {
        for (key, value) in writes {
            let versioned = Versioned::new(value.clone(), version, timestamp, commit_id);
            self.shards
                .entry(key.space().to_string())
                .or_default()
                .data
                .entry(key.clone())
                .or_default()
                .push(versioned);
        }
        self.version.fetch_max(version, Ordering::AcqRel);
        tracing::trace!(target: "popreg::storage", version, writes = writes.len(), "batch applied");
    }
}

impl Storage for ShardedStore {
    fn get(&self, key: &Key) -> StoreResult<Option<VersionedValue>> {
        Ok(self.latest(key))
    }

    fn get_at(&self, key: &Key, position: usize) -> StoreResult<Option<VersionedValue>> {
        Ok(self.at(key, position))
    }

    fn history_len(&self, key: &Key) -> StoreResult<usize> {
        Ok(self.chain_len(key))
    }

    fn current_version(&self) -> u64 {
        self.version()
    }
}

impl Default for ShardedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShardedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardedStore")
            .field("shard_count", &self.shard_count())
            .field("version", &self.version())
            .field("total_keys", &self.total_keys())
            .finish()
    }
}
