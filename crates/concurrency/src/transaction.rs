//! Transaction context
//!
//! Buffers writes and records the version of every key it reads. Nothing
//! touches storage until `TransactionManager::commit` validates the read set
//! and applies the write set.

use popreg_core::{Key, Storage, StoreResult, Value};
use std::collections::{BTreeMap, HashMap};

/// In-flight transaction state
pub struct TransactionContext<'a> {
    store: &'a dyn Storage,
    /// Version observed for every key read (0 = absent)
    pub(crate) read_set: HashMap<Key, u64>,
    /// Buffered writes, ordered by key for deterministic commit records
    pub(crate) write_set: BTreeMap<Key, Value>,
}

impl<'a> TransactionContext<'a> {
    /// Begin a transaction against the given storage
    pub fn new(store: &'a dyn Storage) -> Self {
        Self {
            store,
            read_set: HashMap::new(),
            write_set: BTreeMap::new(),
        }
    }

    /// Read the current value of a key
    ///
    /// Returns this transaction's own buffered write if there is one;
    /// otherwise reads storage and records the observed version.
    pub fn get(&mut self, key: &Key) -> StoreResult<Option<Value>> {
        if let Some(value) = self.write_set.get(key) {
            return Ok(Some(value.clone()));
        }

        let current = self.store.get(key)?;
        let observed = current.as_ref().map(|vv| vv.version).unwrap_or(0);
        self.read_set.entry(key.clone()).or_insert(observed);
        Ok(current.map(|vv| vv.value))
    }

    /// Whether a key currently has a value
    pub fn exists(&mut self, key: &Key) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Buffer a write
    pub fn put(&mut self, key: Key, value: Value) {
        self.write_set.insert(key, value);
    }

    /// Whether the transaction has buffered any write
    pub fn is_read_only(&self) -> bool {
        self.write_set.is_empty()
    }
}

impl std::fmt::Debug for TransactionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionContext")
            .field("reads", &self.read_set.len())
            .field("writes", &self.write_set.len())
            .finish()
    }
}
