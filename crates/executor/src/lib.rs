//! Command execution layer for popreg
//!
//! - `command` / `output`: the request surface
//! - `error`: request-level error taxonomy
//! - `executor`: dispatches commands to handlers
//! - `api`: the typed [`Registry`] facade

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod bridge;
pub mod command;
pub mod convert;
pub mod error;
pub mod executor;
pub mod handlers;
pub mod output;

pub use api::Registry;
pub use command::Command;
pub use error::{Error, Result};
pub use executor::Executor;
pub use output::Output;
