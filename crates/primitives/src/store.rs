//! Record service
//!
//! Stateless facade over the Database engine. `RecordStore` holds only an
//! `Arc<Database>`; clones share the same backend and see the same data.
//!
//! Each operation is one backend transaction. Create and update read the key
//! inside the transaction before writing, so the guard and the write commit
//! together: if another writer touches the key in between, the engine re-runs
//! the closure and the guard sees the new state.

use crate::history::History;
use crate::person::{seed_records, PersonRecord};
use popreg_core::{Key, StoreError, StoreResult};
use popreg_engine::Database;
use std::sync::Arc;

/// Storage space holding person records
pub const PERSON_SPACE: &str = "person";

/// Versioned person-record store
#[derive(Clone)]
pub struct RecordStore {
    db: Arc<Database>,
}

impl RecordStore {
    /// Create a record store over a shared database
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Backend handle
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    /// Storage key for a passport number
    pub fn key(passport_number: &str) -> Key {
        Key::new(PERSON_SPACE, passport_number)
    }

    /// Whether a record exists
    pub fn exists(&self, passport_number: &str) -> StoreResult<bool> {
        Ok(self.db.get(&Self::key(passport_number))?.is_some())
    }

    /// Create a record
    ///
    /// `record.passport_number` is overwritten with `passport_number`.
    /// Returns the commit version.
    ///
    /// # Errors
    /// - `AlreadyExists` if the key has a value; nothing is written
    pub fn create(&self, passport_number: &str, record: PersonRecord) -> StoreResult<u64> {
        let key = Self::key(passport_number);
        let value = record.with_passport_number(passport_number).to_value()?;

        let ((), info) = self.db.transaction_with_version(|txn| {
            if txn.exists(&key)? {
                return Err(StoreError::already_exists(key.clone()));
            }
            txn.put(key.clone(), value.clone());
            Ok(())
        })?;

        tracing::debug!(target: "popreg::records", key = %key, version = info.version, "Record created");
        Ok(info.version)
    }

    /// Read the current record
    ///
    /// # Errors
    /// - `NotFound` if the key has no value
    /// - `Corruption` if the stored value does not decode
    pub fn read(&self, passport_number: &str) -> StoreResult<PersonRecord> {
        let key = Self::key(passport_number);
        match self.db.get(&key)? {
            Some(stored) => PersonRecord::from_value(&key, None, &stored.value),
            None => Err(StoreError::not_found(key)),
        }
    }

    /// Replace the current record
    ///
    /// `record.passport_number` is overwritten with `passport_number`.
    /// Returns the commit version.
    ///
    /// # Errors
    /// - `NotFound` if the key has no value; nothing is written
    pub fn update(&self, passport_number: &str, record: PersonRecord) -> StoreResult<u64> {
        let key = Self::key(passport_number);
        let value = record.with_passport_number(passport_number).to_value()?;

        let ((), info) = self.db.transaction_with_version(|txn| {
            if !txn.exists(&key)? {
                return Err(StoreError::not_found(key.clone()));
            }
            txn.put(key.clone(), value.clone());
            Ok(())
        })?;

        tracing::debug!(target: "popreg::records", key = %key, version = info.version, "Record updated");
        Ok(info.version)
    }

    /// History handle for a record
    ///
    /// # Errors
    /// - `NotFound` if the key was never created
    pub fn history(&self, passport_number: &str) -> StoreResult<History> {
        let key = Self::key(passport_number);
        if self.db.history_len(&key)? == 0 {
            return Err(StoreError::not_found(key));
        }
        Ok(History::new(Arc::clone(&self.db), key))
    }

    /// Number of records stored
    pub fn count(&self) -> StoreResult<usize> {
        self.db.space_len(PERSON_SPACE)
    }

    /// Write the two fixed seed records
    ///
    /// Records that already exist are left untouched. Returns how many were
    /// created.
    pub fn seed(&self) -> StoreResult<usize> {
        let mut created = 0;
        for record in seed_records() {
            let passport_number = record.passport_number.clone();
            match self.create(&passport_number, record) {
                Ok(_) => created += 1,
                Err(e) if e.is_already_exists() => {
                    tracing::info!(
                        target: "popreg::records",
                        key = %passport_number,
                        "Seed record already present, skipping"
                    );
                }
                Err(e) => return Err(e),
            }
        }
        tracing::info!(target: "popreg::records", created, "Seeding finished");
        Ok(created)
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore").field("db", &self.db).finish()
    }
}
