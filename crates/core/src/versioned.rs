//! Versioned wrapper and commit metadata
//!
//! Every value written to the backend is tagged with:
//! - `version`: global commit sequence number (monotonic, first commit is 1)
//! - `timestamp`: wall-clock commit time in microseconds since the Unix epoch
//! - `commit_id`: unique identifier of the committing transaction
//!
//! All writes of one transaction share the same version, timestamp and commit id.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Commit time in microseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Current wall-clock time
    pub fn now() -> Self {
        Timestamp(Utc::now().timestamp_micros())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match chrono::DateTime::from_timestamp_micros(self.0) {
            Some(dt) => write!(f, "{}", dt.to_rfc3339()),
            None => write!(f, "{}us", self.0),
        }
    }
}

/// Identifier of a committed transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitId(pub Uuid);

impl CommitId {
    /// Fresh random commit id
    pub fn new() -> Self {
        CommitId(Uuid::new_v4())
    }
}

impl Default for CommitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// A value together with the commit that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versioned<T> {
    /// The stored value
    pub value: T,
    /// Commit sequence number
    pub version: u64,
    /// Commit time
    pub timestamp: Timestamp,
    /// Committing transaction
    pub commit_id: CommitId,
}

impl<T> Versioned<T> {
    /// Wrap a value with commit metadata
    pub fn new(value: T, version: u64, timestamp: Timestamp, commit_id: CommitId) -> Self {
        Self {
            value,
            version,
            timestamp,
            commit_id,
        }
    }
}

/// Versioned backend value
pub type VersionedValue = Versioned<crate::Value>;
