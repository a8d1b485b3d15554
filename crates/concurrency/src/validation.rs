//! Transaction validation for OCC
//!
//! Conflict detection rules:
//! - First-committer-wins based on READ-SET, not write-set
//! - Blind writes (write without read) do NOT conflict
//! - A key read as absent is recorded at version 0; if it exists at commit
//!   time the transaction conflicts. This is what makes check-then-create
//!   atomic: of two transactions that both saw the key absent, only the
//!   first to commit succeeds.

use popreg_core::{Key, Storage, StoreResult};
use std::collections::HashMap;

/// Types of conflicts that can occur during transaction validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictType {
    /// Read-write conflict: key was read at one version but current version differs
    ReadWriteConflict {
        /// The key that has a conflict
        key: Key,
        /// Version recorded in read_set when read (0 = absent)
        read_version: u64,
        /// Current version in storage at validation time (0 = absent)
        current_version: u64,
    },
}

impl ConflictType {
    /// Key involved in the conflict
    pub fn key(&self) -> &Key {
        match self {
            ConflictType::ReadWriteConflict { key, .. } => key,
        }
    }
}

/// Result of transaction validation
///
/// Accumulates all conflicts found during validation.
/// A transaction commits only if no conflict was found.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// All conflicts detected during validation
    pub conflicts: Vec<ConflictType>,
}

impl ValidationResult {
    /// Create a successful validation result (no conflicts)
    pub fn ok() -> Self {
        ValidationResult {
            conflicts: Vec::new(),
        }
    }

    /// Get the number of conflicts
    pub fn conflict_count(&self) -> usize {
        self.conflicts.len()
    }

    /// First conflict, if any
    pub fn first(&self) -> Option<&ConflictType> {
        self.conflicts.first()
    }
}

/// Validate the read-set against current storage state
///
/// For each key in read_set, check if the current version matches the
/// version observed when the key was read; report a ReadWriteConflict for
/// every key whose version moved.
///
/// # Arguments
/// * `read_set` - Keys read with their versions at read time
/// * `store` - Storage to check current versions against
///
/// # Errors
/// Storage read failures are propagated rather than treated as absence.
pub fn validate_read_set<S: Storage + ?Sized>(
    read_set: &HashMap<Key, u64>,
    store: &S,
) -> StoreResult<ValidationResult> {
    let mut result = ValidationResult::ok();

    for (key, read_version) in read_set {
        let current_version = store.get(key)?.map(|vv| vv.version).unwrap_or(0);

        if current_version != *read_version {
            result.conflicts.push(ConflictType::ReadWriteConflict {
                key: key.clone(),
                read_version: *read_version,
                current_version,
            });
        }
    }

    Ok(result)
}
