//! Registry end-to-end suite
//!
//! Exercises the public `Registry` API against ephemeral and disk-backed
//! databases.
//!
//! - `scenarios`: the worked create/read/update/history examples
//! - `properties`: create-once, update-requires-existence, history
//!   completeness, read-latest, not-found symmetry (proptest)
//! - `durability`: reopen, torn log, corrupt log, lock exclusivity
//! - `concurrency`: racing creates and updates
//! - `failures`: corrupt records and an unavailable backend
//!
//! ```bash
//! cargo test --test registry_scenarios
//! ```

mod test_utils;

mod concurrency;
mod durability;
mod failures;
mod properties;
mod scenarios;
