//! Corrupt stored data and an unavailable backend.

use crate::test_utils::*;
use popreg::{Database, Error, RecordStore, Registry};
use popreg_core::Value;
use std::sync::Arc;

fn write_raw(db: &Arc<Database>, passport: &str, value: Value) {
    db.transaction(|txn| {
        txn.put(RecordStore::key(passport), value.clone());
        Ok(())
    })
    .unwrap();
}

#[test]
fn corrupt_current_value_is_not_reported_as_missing() {
    init_tracing();
    let db = Database::ephemeral().unwrap();
    let registry = Registry::from_database(Arc::clone(&db));
    write_raw(&db, "8", Value::from("{\"PassportNumber\":"));

    assert!(registry.exists("8").unwrap());
    match registry.read("8").unwrap_err() {
        Error::CorruptRecord { key, position, .. } => {
            assert_eq!(key, "8");
            assert_eq!(position, None);
        }
        other => panic!("expected CorruptRecord, got {:?}", other),
    }
}

#[test]
fn corrupt_history_version_fails_whole_history_with_position() {
    init_tracing();
    let db = Database::ephemeral().unwrap();
    let registry = Registry::from_database(Arc::clone(&db));

    registry.create(person("9", "a", "Moscow")).unwrap();
    registry.update(person("9", "b", "Moscow")).unwrap();
    write_raw(&db, "9", Value::Bytes(vec![0xde, 0xad]));
    registry.update(person("9", "d", "Moscow")).unwrap();

    // The current value is fine; only history hits the bad version
    assert_eq!(registry.read("9").unwrap().name, "d");
    match registry.history("9").unwrap_err() {
        Error::CorruptRecord { key, position, .. } => {
            assert_eq!(key, "9");
            assert_eq!(position, Some(2));
        }
        other => panic!("expected CorruptRecord, got {:?}", other),
    }
}

#[test]
fn lazy_history_yields_prefix_then_error() {
    init_tracing();
    let db = Database::ephemeral().unwrap();
    let store = RecordStore::new(Arc::clone(&db));

    store.create("10", person("10", "a", "Moscow")).unwrap();
    write_raw(&db, "10", Value::from("[]"));

    let history = store.history("10").unwrap();
    let results: Vec<_> = history.iter().collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());

    // Restarting walks the same sequence again
    assert_eq!(history.iter().count(), 2);
}

#[test]
fn shut_down_backend_is_unavailable_for_every_operation() {
    let registry = ephemeral();
    registry.create(person("1", "a", "Moscow")).unwrap();
    registry.shutdown().unwrap();

    let unavailable = |r: Result<(), Error>| matches!(r, Err(Error::BackendUnavailable { .. }));
    assert!(unavailable(registry.exists("1").map(drop)));
    assert!(unavailable(registry.read("1").map(drop)));
    assert!(unavailable(registry.create(person("2", "b", "Moscow")).map(drop)));
    assert!(unavailable(registry.update(person("1", "b", "Moscow")).map(drop)));
    assert!(unavailable(registry.history("1").map(drop)));
    assert!(unavailable(registry.init().map(drop)));
}
