//! Requests accepted by the [`Executor`](crate::Executor).

use popreg_primitives::PersonRecord;
use serde::{Deserialize, Serialize};

/// One registry request
///
/// Record commands take the passport number from the record itself
/// (`PersonRecord::passport_number`) for `Create` and `Update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "args")]
pub enum Command {
    // ==================== Registry ====================
    /// Seed the two fixed records into the registry
    Init,

    // ==================== Records ====================
    /// Whether a record exists
    Exists {
        /// Passport number
        passport_number: String,
    },
    /// Create a record
    Create {
        /// Record to store, keyed by its passport number
        record: PersonRecord,
    },
    /// Read the current record
    Read {
        /// Passport number
        passport_number: String,
    },
    /// Replace the current record
    Update {
        /// New record contents, keyed by its passport number
        record: PersonRecord,
    },
    /// Every version of a record, oldest first
    History {
        /// Passport number
        passport_number: String,
    },

    // ==================== Database ====================
    /// Current configuration
    ConfigGet,
    /// Force the commit log to disk
    Flush,
    /// Stop serving requests
    Shutdown,
}

impl Command {
    /// Variant name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::Init => "Init",
            Command::Exists { .. } => "Exists",
            Command::Create { .. } => "Create",
            Command::Read { .. } => "Read",
            Command::Update { .. } => "Update",
            Command::History { .. } => "History",
            Command::ConfigGet => "ConfigGet",
            Command::Flush => "Flush",
            Command::Shutdown => "Shutdown",
        }
    }
}
