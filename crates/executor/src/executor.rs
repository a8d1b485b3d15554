//! Command dispatcher.

use std::sync::Arc;

use popreg_engine::Database;

use crate::bridge::Primitives;
use crate::handlers;
use crate::{Command, Output, Result};

/// Executes [`Command`]s against one database
///
/// Cheap to clone; clones share the same primitives.
#[derive(Clone)]
pub struct Executor {
    primitives: Arc<Primitives>,
}

impl Executor {
    /// Create an executor over a database
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            primitives: Arc::new(Primitives::new(db)),
        }
    }

    /// Backend handle
    pub fn database(&self) -> &Arc<Database> {
        &self.primitives.db
    }

    /// Execute one command
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let name = cmd.name();
        tracing::debug!(target: "popreg::executor", command = name, "Executing command");

        let p = &self.primitives;
        let result = match cmd {
            Command::Init => handlers::person::init(p),
            Command::Exists { passport_number } => handlers::person::exists(p, passport_number),
            Command::Create { record } => handlers::person::create(p, record),
            Command::Read { passport_number } => handlers::person::read(p, passport_number),
            Command::Update { record } => handlers::person::update(p, record),
            Command::History { passport_number } => handlers::person::history(p, passport_number),
            Command::ConfigGet => handlers::config::config_get(p),
            Command::Flush => handlers::config::flush(p),
            Command::Shutdown => handlers::config::shutdown(p),
        };

        if let Err(ref e) = result {
            tracing::debug!(target: "popreg::executor", command = name, error = %e, "Command failed");
        }
        result
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("db", &self.primitives.db)
            .finish()
    }
}
