//! Bridge between the executor and the record service.
//!
//! Holds the primitives every handler dispatches to and the request-level
//! input checks that run before any backend call.

use std::sync::Arc;

use popreg_core::{StoreError, StoreResult};
use popreg_engine::{Database, Limits};
use popreg_primitives::{PersonRecord, RecordStore};

/// Shared handles used by the command handlers
pub struct Primitives {
    /// Backend database
    pub db: Arc<Database>,
    /// Record service over `db`
    pub records: RecordStore,
}

impl Primitives {
    /// Build the primitives over a database
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            records: RecordStore::new(Arc::clone(&db)),
            db,
        }
    }

    /// Current request limits
    pub fn limits(&self) -> Limits {
        self.db.config().limits
    }
}

/// Check a passport number against the key limits.
pub fn validate_key(passport_number: &str, limits: &Limits) -> StoreResult<()> {
    if passport_number.is_empty() {
        return Err(StoreError::invalid_input("passport number must not be empty"));
    }
    if passport_number.len() > limits.max_key_bytes {
        return Err(StoreError::invalid_input(format!(
            "passport number is {} bytes, limit is {}",
            passport_number.len(),
            limits.max_key_bytes
        )));
    }
    Ok(())
}

/// Check a record's key and field lengths.
pub fn validate_record(record: &PersonRecord, limits: &Limits) -> StoreResult<()> {
    validate_key(&record.passport_number, limits)?;
    for (field, value) in record.payload_fields() {
        if value.len() > limits.max_field_bytes {
            return Err(StoreError::invalid_input(format!(
                "{} is {} bytes, limit is {}",
                field,
                value.len(),
                limits.max_field_bytes
            )));
        }
    }
    Ok(())
}
