//! Disk-backed registries across reopen.

use crate::test_utils::*;
use popreg::{Error, Registry};
use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};
use tempfile::TempDir;

const WAL: &str = "popreg.wal";

#[test]
fn records_and_history_survive_reopen() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    {
        let registry = Registry::open(dir.path()).unwrap();
        registry.init().unwrap();
        registry.update(person("1", "Ildar", "Kazan")).unwrap();
        registry.flush().unwrap();
    }

    let registry = Registry::open(dir.path()).unwrap();
    let history = registry.history("1").unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].record.city, "Moscow");
    assert_eq!(history[1].record.city, "Kazan");
    assert_eq!(registry.read("2").unwrap().name, "Artem");

    // The create guard still holds after recovery
    assert_eq!(registry.init().unwrap(), 0);
}

#[test]
fn commit_metadata_survives_reopen() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let before = {
        let registry = Registry::open(dir.path()).unwrap();
        registry.create(person("7", "a", "Moscow")).unwrap();
        registry.history("7").unwrap()
    };

    let after = Registry::open(dir.path()).unwrap().history("7").unwrap();
    assert_eq!(before, after);
}

#[test]
fn second_open_of_same_directory_fails() {
    let (dir, _registry) = on_disk();
    assert!(matches!(
        Registry::open(dir.path()),
        Err(Error::BackendUnavailable { .. })
    ));
}

#[test]
fn torn_log_tail_loses_only_last_commit() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    {
        let registry = Registry::open(dir.path()).unwrap();
        registry.create(person("1", "a", "Moscow")).unwrap();
        registry.update(person("1", "b", "Moscow")).unwrap();
    }

    let path = dir.path().join(WAL);
    let len = std::fs::metadata(&path).unwrap().len();
    OpenOptions::new()
        .write(true)
        .open(&path)
        .unwrap()
        .set_len(len - 5)
        .unwrap();

    let registry = Registry::open(dir.path()).unwrap();
    assert_eq!(registry.read("1").unwrap().name, "a");
    assert_eq!(registry.history("1").unwrap().len(), 1);

    // Writes continue cleanly after the repaired tail
    registry.update(person("1", "c", "Moscow")).unwrap();
    assert_eq!(registry.history("1").unwrap().len(), 2);
}

#[test]
fn checksum_mismatch_fails_open() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    {
        let registry = Registry::open(dir.path()).unwrap();
        registry.create(person("1", "a", "Moscow")).unwrap();
    }

    // Flip the first payload byte past the 12-byte frame header
    let path = dir.path().join(WAL);
    let mut file = OpenOptions::new().read(true).write(true).open(&path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    file.seek(SeekFrom::Start(12)).unwrap();
    file.write_all(&[bytes[12] ^ 0xFF]).unwrap();
    drop(file);

    assert!(matches!(
        Registry::open(dir.path()),
        Err(Error::BackendUnavailable { .. })
    ));
}

#[test]
fn config_file_is_written_with_defaults() {
    let (dir, registry) = on_disk();
    let text = std::fs::read_to_string(dir.path().join("popreg.toml")).unwrap();
    assert!(text.contains("max_txn_retries = 8"));
    assert_eq!(registry.config().unwrap().max_txn_retries, 8);
}

#[test]
fn malformed_config_is_invalid_input() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("popreg.toml"), "durability = 3\n").unwrap();
    assert!(matches!(
        Registry::open(dir.path()),
        Err(Error::InvalidInput { .. })
    ));
}
