//! Database: the versioned backend the record service runs against
//!
//! Owns the sharded store, the commit path and (for disk-backed databases)
//! the write-ahead log, config file and directory lock.
//!
//! # Layout
//!
//! ```text
//! <dir>/
//!   LOCK          exclusive advisory lock held while open
//!   popreg.toml   configuration
//!   popreg.wal    commit log, replayed on open
//! ```

use crate::config::PopregConfig;
use fs2::FileExt;
use parking_lot::{Mutex, RwLock};
use popreg_concurrency::{CommitInfo, TransactionContext, TransactionManager};
use popreg_core::{Key, Storage, StoreError, StoreResult, VersionedValue};
use popreg_durability::{Wal, WalReplay};
use popreg_storage::ShardedStore;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// WAL file name inside the database directory
pub const WAL_FILE_NAME: &str = "popreg.wal";
/// Lock file name inside the database directory
pub const LOCK_FILE_NAME: &str = "LOCK";

/// Embedded versioned key-value database
pub struct Database {
    store: ShardedStore,
    manager: TransactionManager,
    wal: Option<Mutex<Wal>>,
    config: RwLock<PopregConfig>,
    path: Option<PathBuf>,
    accepting: AtomicBool,
    /// Held for the lifetime of the database; the OS releases the lock on close
    _lock: Option<File>,
}

impl Database {
    /// Open (or create) a disk-backed database in `dir`
    ///
    /// Replays the commit log into memory. A torn final log frame is cut off;
    /// a corrupt complete frame fails the open.
    ///
    /// # Errors
    /// - `Storage`: directory, lock, config or log I/O failed, or the
    ///   directory is already open by another `Database`
    /// - `InvalidInput`: `popreg.toml` is malformed
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Arc<Self>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .map_err(|e| StoreError::storage(format!("create {}", dir.display()), e))?;

        let lock = acquire_lock(dir)?;
        let config = PopregConfig::load_or_create(dir)?;

        let wal_path = dir.join(WAL_FILE_NAME);
        let replay = Wal::replay(&wal_path)?;
        if replay.torn_bytes > 0 {
            Wal::truncate(&wal_path, replay.valid_len)?;
        }

        let store = ShardedStore::new();
        let recovered = recover(&store, replay)?;

        let wal = if config.durability.requires_wal() {
            Some(Mutex::new(Wal::open(&wal_path, config.durability)?))
        } else {
            None
        };

        tracing::info!(
            target: "popreg::engine",
            path = %dir.display(),
            durability = ?config.durability,
            recovered_commits = recovered,
            version = store.version(),
            "Database opened"
        );

        Ok(Arc::new(Self {
            store,
            manager: TransactionManager::new(),
            wal,
            config: RwLock::new(config),
            path: Some(dir.to_path_buf()),
            accepting: AtomicBool::new(true),
            _lock: Some(lock),
        }))
    }

    /// Create an in-memory database with default configuration
    ///
    /// Nothing is written to disk; contents are lost on drop.
    pub fn ephemeral() -> StoreResult<Arc<Self>> {
        Self::ephemeral_with_config(PopregConfig::default())
    }

    /// Create an in-memory database with the given configuration
    pub fn ephemeral_with_config(config: PopregConfig) -> StoreResult<Arc<Self>> {
        Ok(Arc::new(Self {
            store: ShardedStore::new(),
            manager: TransactionManager::new(),
            wal: None,
            config: RwLock::new(config),
            path: None,
            accepting: AtomicBool::new(true),
            _lock: None,
        }))
    }

    /// Directory of a disk-backed database
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether the database is still serving requests
    pub fn is_open(&self) -> bool {
        self.accepting.load(Ordering::Acquire)
    }

    /// Latest committed version
    pub fn version(&self) -> u64 {
        self.store.version()
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    /// Run a closure as one transaction
    ///
    /// The closure may run more than once: if commit validation finds that a
    /// key it read has changed, it is re-run against fresh state, up to
    /// `max_txn_retries` times. An error returned by the closure aborts the
    /// transaction without writing anything.
    pub fn transaction<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnMut(&mut TransactionContext<'_>) -> StoreResult<T>,
    {
        self.transaction_with_version(f).map(|(value, _)| value)
    }

    /// Run a closure as one transaction and return its commit info
    pub fn transaction_with_version<T, F>(&self, mut f: F) -> StoreResult<(T, CommitInfo)>
    where
        F: FnMut(&mut TransactionContext<'_>) -> StoreResult<T>,
    {
        let max_retries = self.config.read().max_txn_retries;
        let mut attempt = 0u32;

        loop {
            self.ensure_open()?;

            let mut txn = TransactionContext::new(&self.store);
            let value = f(&mut txn)?;

            match self.manager.commit(txn, &self.store, self.wal.as_ref()) {
                Ok(info) => return Ok((value, info)),
                Err(e) if e.is_conflict() && attempt < max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        target: "popreg::engine",
                        attempt,
                        max_retries,
                        error = %e,
                        "Transaction conflict, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    // =========================================================================
    // Point reads (outside transactions)
    // =========================================================================

    /// Current value of a key
    pub fn get(&self, key: &Key) -> StoreResult<Option<VersionedValue>> {
        self.ensure_open()?;
        self.store.get(key)
    }

    /// Value of a key at a history position (0 = oldest)
    pub fn get_at(&self, key: &Key, position: usize) -> StoreResult<Option<VersionedValue>> {
        self.ensure_open()?;
        self.store.get_at(key, position)
    }

    /// Number of versions committed for a key
    pub fn history_len(&self, key: &Key) -> StoreResult<usize> {
        self.ensure_open()?;
        self.store.history_len(key)
    }

    /// Number of keys stored in a space
    pub fn space_len(&self, space: &str) -> StoreResult<usize> {
        self.ensure_open()?;
        Ok(self.store.space_key_count(space))
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Force the commit log to stable storage
    pub fn flush(&self) -> StoreResult<()> {
        self.ensure_open()?;
        match &self.wal {
            Some(wal) => wal.lock().sync(),
            None => Ok(()),
        }
    }

    /// Stop serving requests
    ///
    /// Flushes the commit log; every later operation fails with
    /// `Unavailable`. Idempotent.
    pub fn shutdown(&self) -> StoreResult<()> {
        if !self.accepting.swap(false, Ordering::AcqRel) {
            return Ok(());
        }
        tracing::info!(target: "popreg::engine", version = self.store.version(), "Database shut down");
        match &self.wal {
            Some(wal) => wal.lock().sync(),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Snapshot of the current configuration
    pub fn config(&self) -> PopregConfig {
        self.config.read().clone()
    }

    /// Modify the configuration and persist it for disk-backed databases
    ///
    /// Retry and limit changes apply immediately; a durability change applies
    /// on the next open.
    pub fn update_config<F>(&self, f: F) -> StoreResult<()>
    where
        F: FnOnce(&mut PopregConfig),
    {
        self.ensure_open()?;
        let mut config = self.config.write();
        let mut updated = config.clone();
        f(&mut updated);
        if let Some(dir) = &self.path {
            updated.write_to(dir)?;
        }
        *config = updated;
        Ok(())
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(StoreError::unavailable("database is shut down"))
        }
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("path", &self.path)
            .field("open", &self.is_open())
            .field("store", &self.store)
            .finish()
    }
}

fn acquire_lock(dir: &Path) -> StoreResult<File> {
    let path = dir.join(LOCK_FILE_NAME);
    let file = File::create(&path)
        .map_err(|e| StoreError::storage(format!("create {}", path.display()), e))?;
    file.try_lock_exclusive().map_err(|e| {
        StoreError::storage(format!("database {} is already open", dir.display()), e)
    })?;
    Ok(file)
}

fn recover(store: &ShardedStore, replay: WalReplay) -> StoreResult<usize> {
    let count = replay.records.len();
    for record in replay.records {
        if record.version <= store.version() {
            return Err(StoreError::Storage {
                message: format!(
                    "wal out of order: version {} after {}",
                    record.version,
                    store.version()
                ),
                source: None,
            });
        }
        store.apply_batch(
            &record.writes,
            record.version,
            record.timestamp,
            record.commit_id,
        );
    }
    Ok(count)
}
