//! Command handlers.
//!
//! Each handler validates its input, dispatches to `bridge::Primitives` and
//! wraps the result in an [`Output`](crate::Output).

pub mod config;
pub mod person;
