//! Lazy record history
//!
//! [`History`] is a handle on one key's version chain. Each call to
//! [`History::iter`] walks the chain from position 0, fetching and decoding
//! one version per `next()` until the backend reports no version at the
//! current position. Versions committed while iterating are picked up.
//!
//! Iteration is fail-fast: the first version that does not decode is
//! yielded as `Err(Corruption)` carrying its position, and the iterator is
//! then exhausted.

use crate::person::PersonRecord;
use popreg_core::{CommitId, Key, StoreResult, Timestamp};
use popreg_engine::Database;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;
use std::sync::Arc;

/// One decoded version of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 0-based index within the key's history
    pub position: u64,
    /// Global commit version that wrote this entry
    pub version: u64,
    /// Commit time
    pub timestamp: Timestamp,
    /// Committing transaction
    pub commit_id: CommitId,
    /// Record as written
    pub record: PersonRecord,
}

/// Restartable handle on a record's version history
#[derive(Clone)]
pub struct History {
    db: Arc<Database>,
    key: Key,
}

impl History {
    pub(crate) fn new(db: Arc<Database>, key: Key) -> Self {
        Self { db, key }
    }

    /// Key whose history this is
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Iterate oldest-first from position 0
    pub fn iter(&self) -> HistoryIter<'_> {
        HistoryIter {
            db: &self.db,
            key: &self.key,
            position: 0,
            done: false,
        }
    }

    /// Collect every entry, failing on the first corrupt version
    pub fn collect_all(&self) -> StoreResult<Vec<HistoryEntry>> {
        self.iter().collect()
    }
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History").field("key", &self.key).finish()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = StoreResult<HistoryEntry>;
    type IntoIter = HistoryIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over one pass of a [`History`]
pub struct HistoryIter<'a> {
    db: &'a Database,
    key: &'a Key,
    /// Next chain index; indexes the backend directly
    position: usize,
    done: bool,
}

impl HistoryIter<'_> {
    fn fetch(&self) -> StoreResult<Option<HistoryEntry>> {
        let Some(stored) = self.db.get_at(self.key, self.position)? else {
            return Ok(None);
        };
        // usize -> u64 widens on every supported target
        let position = self.position as u64;
        let record = PersonRecord::from_value(self.key, Some(position), &stored.value)?;
        Ok(Some(HistoryEntry {
            position,
            version: stored.version,
            timestamp: stored.timestamp,
            commit_id: stored.commit_id,
            record,
        }))
    }
}

impl Iterator for HistoryIter<'_> {
    type Item = StoreResult<HistoryEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.fetch() {
            Ok(Some(entry)) => {
                self.position += 1;
                Some(Ok(entry))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                tracing::warn!(
                    target: "popreg::records",
                    key = %self.key,
                    position = self.position,
                    error = %e,
                    "History iteration stopped"
                );
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl FusedIterator for HistoryIter<'_> {}
