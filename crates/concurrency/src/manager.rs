//! Commit path
//!
//! A single commit lock serializes validate-log-apply. Storage reads stay
//! lock-free; only commits queue behind each other.

use crate::transaction::TransactionContext;
use crate::validation::validate_read_set;
use parking_lot::Mutex;
use popreg_core::{CommitId, StoreError, StoreResult, Timestamp};
use popreg_durability::{Wal, WalRecord};
use popreg_storage::ShardedStore;

/// Result of a successful commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitInfo {
    /// Version assigned to the writes, or the version the reads observed
    /// for a read-only transaction
    pub version: u64,
    /// Commit id of the writes, None for a read-only transaction
    pub commit_id: Option<CommitId>,
}

/// Serializes commits against one store
#[derive(Debug, Default)]
pub struct TransactionManager {
    commit_lock: Mutex<()>,
}

impl TransactionManager {
    /// Create a manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and apply a transaction
    ///
    /// 1. Take the commit lock
    /// 2. Validate the read set against current storage
    /// 3. Read-only: done, nothing allocated
    /// 4. Append the commit record to the WAL (if any)
    /// 5. Apply the write set to storage
    ///
    /// A WAL failure aborts before storage changes, so memory never holds a
    /// commit the log does not.
    ///
    /// # Errors
    /// - `Conflict`: a key in the read set changed since it was read
    /// - `Storage`: the WAL append failed
    pub fn commit(
        &self,
        txn: TransactionContext<'_>,
        store: &ShardedStore,
        wal: Option<&Mutex<Wal>>,
    ) -> StoreResult<CommitInfo> {
        let _guard = self.commit_lock.lock();

        let validation = validate_read_set(&txn.read_set, store)?;
        if let Some(conflict) = validation.first() {
            tracing::debug!(
                target: "popreg::txn",
                key = %conflict.key(),
                conflicts = validation.conflict_count(),
                "Commit rejected by read-set validation"
            );
            return Err(StoreError::conflict(conflict.key().clone()));
        }

        if txn.is_read_only() {
            return Ok(CommitInfo {
                version: store.version(),
                commit_id: None,
            });
        }

        let version = store.version() + 1;
        let timestamp = Timestamp::now();
        let commit_id = CommitId::new();
        let writes: Vec<_> = txn.write_set.into_iter().collect();

        if let Some(wal) = wal {
            wal.lock().append(&WalRecord {
                version,
                timestamp,
                commit_id,
                writes: writes.clone(),
            })?;
        }

        store.apply_batch(&writes, version, timestamp, commit_id);
        Ok(CommitInfo {
            version,
            commit_id: Some(commit_id),
        })
    }
}
