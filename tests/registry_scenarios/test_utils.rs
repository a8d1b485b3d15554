//! Shared helpers for the registry suite.

use popreg::{PersonRecord, Registry};
use std::sync::Once;
use tempfile::TempDir;
use tracing_subscriber::filter::LevelFilter;

static TRACING: Once = Once::new();

/// Route library logs to the test harness output (shown on failure).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(LevelFilter::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

pub fn ephemeral() -> Registry {
    init_tracing();
    Registry::ephemeral().unwrap()
}

/// Disk-backed registry; keep the TempDir alive for the registry's lifetime.
pub fn on_disk() -> (TempDir, Registry) {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let registry = Registry::open(dir.path()).unwrap();
    (dir, registry)
}

/// Both backends, for tests that must hold on each.
pub fn each_backend(mut f: impl FnMut(&Registry)) {
    f(&ephemeral());
    let (_dir, registry) = on_disk();
    f(&registry);
}

pub fn person(passport: &str, name: &str, city: &str) -> PersonRecord {
    PersonRecord::new(
        passport,
        name,
        "Zinatulin",
        city,
        "Some street, house 1, apartment 10",
        "+79999999999",
        "Not married",
    )
}
