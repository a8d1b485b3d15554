//! Person record command handlers.
//!
//! Dispatches directly to `RecordStore` via `bridge::Primitives`. Writes are
//! validated against the configured limits first; a rejected write never
//! reaches the backend. Lookups take any key: a key no write could have
//! stored is simply not found.

use std::sync::Arc;

use popreg_primitives::PersonRecord;

use crate::bridge::{validate_record, Primitives};
use crate::convert::convert_result;
use crate::{Output, Result};

/// Handle Init command.
pub fn init(p: &Arc<Primitives>) -> Result<Output> {
    let created = convert_result(p.records.seed())?;
    Ok(Output::Seeded(created))
}

/// Handle Exists command.
pub fn exists(p: &Arc<Primitives>, passport_number: String) -> Result<Output> {
    let found = convert_result(p.records.exists(&passport_number))?;
    Ok(Output::Bool(found))
}

/// Handle Create command.
pub fn create(p: &Arc<Primitives>, record: PersonRecord) -> Result<Output> {
    convert_result(validate_record(&record, &p.limits()))?;
    let key = record.passport_number.clone();
    let version = convert_result(p.records.create(&key, record))?;
    Ok(Output::Version(version))
}

/// Handle Read command.
pub fn read(p: &Arc<Primitives>, passport_number: String) -> Result<Output> {
    let record = convert_result(p.records.read(&passport_number))?;
    Ok(Output::Record(record))
}

/// Handle Update command.
pub fn update(p: &Arc<Primitives>, record: PersonRecord) -> Result<Output> {
    convert_result(validate_record(&record, &p.limits()))?;
    let key = record.passport_number.clone();
    let version = convert_result(p.records.update(&key, record))?;
    Ok(Output::Version(version))
}

/// Handle History command.
///
/// Materializes the whole history; one corrupt version fails the request.
pub fn history(p: &Arc<Primitives>, passport_number: String) -> Result<Output> {
    let history = convert_result(p.records.history(&passport_number))?;
    let entries = convert_result(history.collect_all())?;
    Ok(Output::History(entries))
}
