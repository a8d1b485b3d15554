//! Typed registry API.
//!
//! [`Registry`] wraps an [`Executor`] and unwraps each [`Output`] into the
//! type the caller expects.
//!
//! ```text
//! use popreg_executor::Registry;
//!
//! let registry = Registry::open("/path/to/data")?;
//! registry.init()?;
//! let record = registry.read("1")?;
//! for entry in registry.history("1")? {
//!     println!("{} {}", entry.version, entry.record.name);
//! }
//! ```

mod db;
mod records;

use std::path::Path;
use std::sync::Arc;

use popreg_engine::Database;

use crate::convert::convert_result;
use crate::{Executor, Result};

/// Registry handle
#[derive(Debug, Clone)]
pub struct Registry {
    executor: Executor,
}

impl Registry {
    /// Open (or create) a disk-backed registry in `dir`
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let db = convert_result(Database::open(dir))?;
        Ok(Self::from_database(db))
    }

    /// In-memory registry; contents are lost on drop
    pub fn ephemeral() -> Result<Self> {
        let db = convert_result(Database::ephemeral())?;
        Ok(Self::from_database(db))
    }

    /// Registry over an existing database
    pub fn from_database(db: Arc<Database>) -> Self {
        Self {
            executor: Executor::new(db),
        }
    }

    /// Underlying executor, for raw [`Command`](crate::Command) access
    pub fn executor(&self) -> &Executor {
        &self.executor
    }
}
