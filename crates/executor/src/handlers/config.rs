//! Config and lifecycle command handlers.
//!
//! Handles ConfigGet, Flush and Shutdown.

use std::sync::Arc;

use crate::bridge::Primitives;
use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle ConfigGet command: return the current database configuration.
pub fn config_get(p: &Arc<Primitives>) -> Result<Output> {
    Ok(Output::Config(p.db.config()))
}

/// Handle Flush command: sync the commit log.
pub fn flush(p: &Arc<Primitives>) -> Result<Output> {
    convert_result(p.db.flush())?;
    Ok(Output::Unit)
}

/// Handle Shutdown command: stop the backend serving requests.
pub fn shutdown(p: &Arc<Primitives>) -> Result<Output> {
    convert_result(p.db.shutdown())?;
    Ok(Output::Unit)
}
