//! Results returned by the [`Executor`](crate::Executor).

use popreg_engine::PopregConfig;
use popreg_primitives::{HistoryEntry, PersonRecord};
use serde::{Deserialize, Serialize};

/// Successful command result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "output", content = "value")]
pub enum Output {
    /// No value
    Unit,
    /// Yes/no answer
    Bool(bool),
    /// Commit version of a write
    Version(u64),
    /// Number of records seeded
    Seeded(usize),
    /// One record
    Record(PersonRecord),
    /// A record's versions, oldest first
    History(Vec<HistoryEntry>),
    /// Configuration snapshot
    Config(PopregConfig),
}
