//! Worked examples of the registry contract.

use crate::test_utils::*;
use popreg::{Database, Error, PersonRecord, RecordStore, Registry};
use std::sync::Arc;

#[test]
fn create_then_read_and_single_entry_history() {
    each_backend(|registry| {
        let record = person("1", "Ildar", "Moscow");
        registry.create(record.clone()).unwrap();

        assert_eq!(registry.read("1").unwrap(), record);
        let history = registry.history("1").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].record, record);
        assert_eq!(history[0].position, 0);
    });
}

#[test]
fn updates_extend_history_in_order() {
    each_backend(|registry| {
        let rec2 = person("2", "Artem", "Moscow");
        let rec2b = person("2", "Artem", "Kazan");
        let rec2c = person("2", "Artem", "Sochi");

        registry.create(rec2.clone()).unwrap();
        registry.update(rec2b.clone()).unwrap();
        registry.update(rec2c.clone()).unwrap();

        let records: Vec<PersonRecord> = registry
            .history("2")
            .unwrap()
            .into_iter()
            .map(|e| e.record)
            .collect();
        assert_eq!(records, vec![rec2, rec2b, rec2c.clone()]);
        assert_eq!(registry.read("2").unwrap(), rec2c);
    });
}

#[test]
fn second_create_is_rejected_and_value_unchanged() {
    each_backend(|registry| {
        let rec = person("3", "first", "Moscow");
        registry.create(rec.clone()).unwrap();

        let err = registry.create(person("3", "second", "Omsk")).unwrap_err();
        assert_eq!(err, Error::AlreadyExists { key: "3".into() });
        assert_eq!(registry.read("3").unwrap(), rec);
        assert_eq!(registry.history("3").unwrap().len(), 1);
    });
}

#[test]
fn read_on_untouched_backend_is_not_found() {
    each_backend(|registry| {
        assert_eq!(
            registry.read("999").unwrap_err(),
            Error::NotFound { key: "999".into() }
        );
    });
}

#[test]
fn init_seeds_fixed_records_once() {
    each_backend(|registry| {
        assert_eq!(registry.init().unwrap(), 2);

        let ildar = registry.read("1").unwrap();
        assert_eq!(ildar.name, "Ildar");
        assert_eq!(ildar.residential_address, "Some street, house 1, apartment 10");
        let artem = registry.read("2").unwrap();
        assert_eq!(artem.last_name, "Barger");
        assert_eq!(artem.family_status, "No data");

        // Re-running leaves existing records and their history alone
        assert_eq!(registry.init().unwrap(), 0);
        assert_eq!(registry.history("1").unwrap().len(), 1);
    });
}

#[test]
fn history_versions_are_strictly_increasing() {
    each_backend(|registry| {
        registry.create(person("4", "a", "Moscow")).unwrap();
        registry.create(person("5", "x", "Moscow")).unwrap();
        registry.update(person("4", "b", "Moscow")).unwrap();
        registry.update(person("4", "c", "Moscow")).unwrap();

        let versions: Vec<u64> = registry
            .history("4")
            .unwrap()
            .iter()
            .map(|e| e.version)
            .collect();
        assert_eq!(versions.len(), 3);
        assert!(versions.windows(2).all(|w| w[0] < w[1]));
    });
}

#[test]
fn exists_tracks_lifecycle() {
    each_backend(|registry| {
        assert!(!registry.exists("6").unwrap());
        registry.create(person("6", "a", "Moscow")).unwrap();
        assert!(registry.exists("6").unwrap());
        registry.update(person("6", "b", "Moscow")).unwrap();
        assert!(registry.exists("6").unwrap());
    });
}

#[test]
fn empty_passport_number_cannot_be_created() {
    let registry = ephemeral();
    assert!(matches!(
        registry.create(person("", "a", "Moscow")),
        Err(Error::InvalidInput { .. })
    ));
    assert!(matches!(
        registry.update(person("", "a", "Moscow")),
        Err(Error::InvalidInput { .. })
    ));
}

#[test]
fn lookups_of_unstorable_keys_are_not_found() {
    let registry = ephemeral();
    let long = "9".repeat(300);

    for key in ["", long.as_str()] {
        assert!(!registry.exists(key).unwrap());
        assert_eq!(registry.read(key), Err(Error::NotFound { key: key.into() }));
        assert_eq!(
            registry.history(key),
            Err(Error::NotFound { key: key.into() })
        );
    }
}

#[test]
fn shrinking_key_limit_keeps_existing_records_readable() {
    init_tracing();
    let db = Database::ephemeral().unwrap();
    let record = person("12345", "Ildar", "Moscow");
    RecordStore::new(Arc::clone(&db))
        .create("12345", record.clone())
        .unwrap();

    db.update_config(|cfg| cfg.limits.max_key_bytes = 3).unwrap();
    let registry = Registry::from_database(db);

    assert!(registry.exists("12345").unwrap());
    assert_eq!(registry.read("12345").unwrap(), record);
    assert_eq!(registry.history("12345").unwrap().len(), 1);
    assert!(matches!(
        registry.update(person("12345", "Ildar", "Kazan")),
        Err(Error::InvalidInput { .. })
    ));
}

#[test]
fn config_defaults_are_reported() {
    let registry = ephemeral();
    let config = registry.config().unwrap();
    assert_eq!(config.max_txn_retries, 8);
    assert_eq!(config.limits.max_key_bytes, 256);
}
