//! Database operations: configuration, flush, shutdown.

use super::Registry;
use crate::{Command, Error, Output, Result};
use popreg_engine::PopregConfig;

impl Registry {
    /// Get the current database configuration.
    pub fn config(&self) -> Result<PopregConfig> {
        match self.executor.execute(Command::ConfigGet)? {
            Output::Config(cfg) => Ok(cfg),
            _ => Err(Error::Internal {
                reason: "Unexpected output for ConfigGet".into(),
            }),
        }
    }

    /// Flush the commit log to disk.
    pub fn flush(&self) -> Result<()> {
        match self.executor.execute(Command::Flush)? {
            Output::Unit => Ok(()),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Flush".into(),
            }),
        }
    }

    /// Stop the backend. Every later call fails with `BackendUnavailable`.
    pub fn shutdown(&self) -> Result<()> {
        match self.executor.execute(Command::Shutdown)? {
            Output::Unit => Ok(()),
            _ => Err(Error::Internal {
                reason: "Unexpected output for Shutdown".into(),
            }),
        }
    }
}
