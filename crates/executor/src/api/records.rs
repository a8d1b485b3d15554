//! Person record operations.

use super::Registry;
use crate::{Command, Error, Output, Result};
use popreg_primitives::{HistoryEntry, PersonRecord};

impl Registry {
    // =========================================================================
    // Registry (1)
    // =========================================================================

    /// Seed the two fixed records. Returns how many were created.
    pub fn init(&self) -> Result<usize> {
        match self.executor.execute(Command::Init)? {
            Output::Seeded(count) => Ok(count),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Init".into(),
            }),
        }
    }

    // =========================================================================
    // Records (5)
    // =========================================================================

    /// Whether a record exists.
    pub fn exists(&self, passport_number: &str) -> Result<bool> {
        match self.executor.execute(Command::Exists {
            passport_number: passport_number.to_string(),
        })? {
            Output::Bool(found) => Ok(found),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Exists".into(),
            }),
        }
    }

    /// Create a record under its passport number. Returns the commit version.
    pub fn create(&self, record: PersonRecord) -> Result<u64> {
        match self.executor.execute(Command::Create { record })? {
            Output::Version(v) => Ok(v),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Create".into(),
            }),
        }
    }

    /// Read the current record.
    pub fn read(&self, passport_number: &str) -> Result<PersonRecord> {
        match self.executor.execute(Command::Read {
            passport_number: passport_number.to_string(),
        })? {
            Output::Record(record) => Ok(record),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Read".into(),
            }),
        }
    }

    /// Replace the record stored under its passport number. Returns the
    /// commit version.
    pub fn update(&self, record: PersonRecord) -> Result<u64> {
        match self.executor.execute(Command::Update { record })? {
            Output::Version(v) => Ok(v),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Update".into(),
            }),
        }
    }

    /// Every version of a record, oldest first.
    pub fn history(&self, passport_number: &str) -> Result<Vec<HistoryEntry>> {
        match self.executor.execute(Command::History {
            passport_number: passport_number.to_string(),
        })? {
            Output::History(entries) => Ok(entries),
            _ => Err(Error::Internal {
                reason: "Unexpected output for History".into(),
            }),
        }
    }
}
