//! Record service for popreg
//!
//! - `person`: PersonRecord and its JSON encoding
//! - `store`: RecordStore (exists, create, read, update, history, seed)
//! - `history`: lazy, restartable, fail-fast history iteration
//!
//! RecordStore is a stateless facade over the Database engine.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod history;
pub mod person;
pub mod store;

pub use history::{History, HistoryEntry, HistoryIter};
pub use person::{seed_records, PersonRecord};
pub use store::{RecordStore, PERSON_SPACE};
