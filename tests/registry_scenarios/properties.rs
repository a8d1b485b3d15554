//! Registry contract properties.

use crate::test_utils::*;
use popreg::{Error, PersonRecord};
use proptest::prelude::*;

fn field() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.+-]{0,20}"
}

fn passport() -> impl Strategy<Value = String> {
    "[0-9A-Z]{1,10}"
}

fn payload(key: String) -> impl Strategy<Value = PersonRecord> {
    (field(), field(), field(), field(), field(), field()).prop_map(
        move |(name, last_name, city, address, phone, status)| {
            PersonRecord::new(key.clone(), name, last_name, city, address, phone, status)
        },
    )
}

fn key_and_payloads(max_updates: usize) -> impl Strategy<Value = (String, Vec<PersonRecord>)> {
    passport().prop_flat_map(move |key| {
        (
            Just(key.clone()),
            prop::collection::vec(payload(key), 1..=max_updates + 1),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn create_once((key, payloads) in key_and_payloads(1)) {
        let registry = ephemeral();
        let first = payloads[0].clone();
        let second = payloads.last().unwrap().clone();

        registry.create(first.clone()).unwrap();
        let err = registry.create(second).unwrap_err();

        prop_assert_eq!(err, Error::AlreadyExists { key: key.clone() });
        prop_assert_eq!(registry.read(&key).unwrap(), first);
    }

    #[test]
    fn update_requires_existence((key, payloads) in key_and_payloads(0)) {
        let registry = ephemeral();

        let err = registry.update(payloads[0].clone()).unwrap_err();

        prop_assert_eq!(err, Error::NotFound { key: key.clone() });
        prop_assert!(!registry.exists(&key).unwrap());
    }

    #[test]
    fn history_is_complete_and_read_is_latest((key, payloads) in key_and_payloads(6)) {
        let registry = ephemeral();
        registry.create(payloads[0].clone()).unwrap();
        for p in &payloads[1..] {
            registry.update(p.clone()).unwrap();
        }

        let history: Vec<PersonRecord> = registry
            .history(&key)
            .unwrap()
            .into_iter()
            .map(|e| e.record)
            .collect();

        prop_assert_eq!(history.len(), payloads.len());
        prop_assert_eq!(&history, &payloads);
        prop_assert_eq!(registry.read(&key).unwrap(), payloads.last().unwrap().clone());
    }

    #[test]
    fn missing_key_is_not_found_for_every_operation((key, payloads) in key_and_payloads(0)) {
        let registry = ephemeral();
        let expected = Error::NotFound { key: key.clone() };

        prop_assert_eq!(registry.read(&key).unwrap_err(), expected.clone());
        prop_assert_eq!(registry.update(payloads[0].clone()).unwrap_err(), expected.clone());
        prop_assert_eq!(registry.history(&key).unwrap_err(), expected);
    }
}
