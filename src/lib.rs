//! popreg: a versioned population record registry
//!
//! Person records keyed by passport number, with create-once and
//! update-requires-existence guards and a complete, ordered change history.
//!
//! ```text
//! use popreg::{PersonRecord, Registry};
//!
//! let registry = Registry::open("./data")?;
//! registry.init()?;
//! registry.update(PersonRecord::new("2", "Artem", "Barger", "Kazan", "...", "...", "Married"))?;
//! for entry in registry.history("2")? {
//!     println!("v{} {}", entry.version, entry.record.city);
//! }
//! ```
//!
//! Lower layers are available for embedding the record service directly:
//! [`RecordStore`] over an [`Database`].

#![warn(missing_docs)]

pub mod types;

pub use popreg_executor::{Command, Error, Executor, Output, Registry, Result};
pub use types::*;
