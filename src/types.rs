//! Public types re-exported from the internal crates.

// Records
pub use popreg_primitives::{seed_records, History, HistoryEntry, HistoryIter, PersonRecord};
pub use popreg_primitives::{RecordStore, PERSON_SPACE};

// Commit metadata
pub use popreg_core::{CommitId, Timestamp};

// Backend
pub use popreg_core::{StoreError, StoreResult};
pub use popreg_engine::{Database, DurabilityMode, Limits, PopregConfig};
