//! Concurrent callers sharing one registry.

use crate::test_utils::*;
use popreg::Error;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn concurrent_creates_of_one_key_have_one_winner() {
    const THREADS: usize = 8;

    each_backend(|registry| {
        let barrier = Arc::new(Barrier::new(THREADS));
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let registry = registry.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    registry.create(person("race", &format!("writer{}", i), "Moscow"))
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winners = results.iter().filter(|r| r.is_ok()).count();
        let rejected = results
            .iter()
            .filter(|r| matches!(r, Err(Error::AlreadyExists { .. })))
            .count();

        assert_eq!(winners, 1);
        assert_eq!(rejected, THREADS - 1);
        assert_eq!(registry.history("race").unwrap().len(), 1);
    });
}

#[test]
fn concurrent_updates_all_land_in_history() {
    const THREADS: usize = 4;
    const PER_THREAD: usize = 10;

    let registry = ephemeral();
    registry.create(person("shared", "initial", "Moscow")).unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let registry = registry.clone();
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    registry
                        .update(person("shared", &format!("t{}-{}", t, i), "Moscow"))
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let history = registry.history("shared").unwrap();
    assert_eq!(history.len(), 1 + THREADS * PER_THREAD);
    assert!(history.windows(2).all(|w| w[0].version < w[1].version));
    assert_eq!(registry.read("shared").unwrap(), history.last().unwrap().record);
}

#[test]
fn distinct_keys_create_in_parallel() {
    let registry = ephemeral();
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let registry = registry.clone();
            thread::spawn(move || {
                for i in 0..25 {
                    registry
                        .create(person(&format!("{}-{}", t, i), "n", "Moscow"))
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert!(registry.exists("0-0").unwrap());
    assert!(registry.exists("7-24").unwrap());
}
