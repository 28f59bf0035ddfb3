//! Integration tests for the complete Stringdex pipeline.
//!
//! These tests verify end-to-end functionality across crates:
//! - value → property extraction → record store
//! - free text → interpreter → predicate set → evaluator → records
//! - structured and interpreted paths agreeing on semantics
//!
//! Run with: cargo test --test integration_tests

use stringdex_query::{interpret, PredicateSet, QueryError};
use stringdex_store::{evaluate, InMemoryStore, RecordStore, StoreError};

fn seeded_store() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    for value in [
        "banana",
        "civic",
        "racecar",
        "Never odd or even",
        "hello world",
        "a",
    ] {
        store.insert(value).unwrap();
    }
    store
}

// ============================================================================
// Write path
// ============================================================================

#[test]
fn insert_lookup_delete_round_trip() {
    let mut store = InMemoryStore::new();

    let record = store.insert("hello world").unwrap();
    assert_eq!(record.properties.length, 11);
    assert_eq!(record.properties.word_count, 2);
    assert!(!record.properties.is_palindrome);

    let found = store.lookup("hello world").unwrap();
    assert_eq!(found.id, record.id);

    let removed = store.remove("hello world").unwrap();
    assert_eq!(removed.id, record.id);
    assert!(store.is_empty());
    assert!(matches!(
        store.remove("hello world"),
        Err(StoreError::RecordNotFound { .. })
    ));
}

#[test]
fn duplicate_insert_leaves_exactly_one_record() {
    let mut store = InMemoryStore::new();
    store.insert("civic").unwrap();

    let err = store.insert("civic").unwrap_err();
    assert!(matches!(err, StoreError::DuplicateRecord { .. }));
    assert_eq!(store.len(), 1);
}

// ============================================================================
// Read path: interpreted and structured queries
// ============================================================================

#[test]
fn nl_query_single_word_palindromes() {
    let store = seeded_store();

    let predicates = interpret("all single word palindromic strings").unwrap();
    assert_eq!(
        predicates,
        PredicateSet {
            word_count: Some(1),
            is_palindrome: Some(true),
            ..Default::default()
        }
    );

    let values: Vec<&str> = evaluate(&store, &predicates)
        .iter()
        .map(|r| r.value.as_str())
        .collect();
    assert_eq!(values, vec!["civic", "racecar", "a"]);
}

#[test]
fn nl_query_longer_than_ten_characters() {
    let store = seeded_store();

    let predicates = interpret("strings longer than 10 characters").unwrap();
    assert_eq!(
        predicates,
        PredicateSet {
            min_length: Some(11),
            ..Default::default()
        }
    );

    let values: Vec<&str> = evaluate(&store, &predicates)
        .iter()
        .map(|r| r.value.as_str())
        .collect();
    assert_eq!(values, vec!["Never odd or even", "hello world"]);
}

#[test]
fn nl_query_containing_the_letter_z() {
    let store = seeded_store();

    let predicates = interpret("strings containing the letter z").unwrap();
    assert_eq!(
        predicates,
        PredicateSet {
            contains_character: Some("z".to_string()),
            ..Default::default()
        }
    );
    assert!(evaluate(&store, &predicates).is_empty());
}

#[test]
fn nl_query_first_vowel_heuristic() {
    let store = seeded_store();

    let predicates = interpret("palindromic strings that contain the first vowel").unwrap();
    assert_eq!(
        predicates,
        PredicateSet {
            is_palindrome: Some(true),
            contains_character: Some("a".to_string()),
            ..Default::default()
        }
    );

    let values: Vec<&str> = evaluate(&store, &predicates)
        .iter()
        .map(|r| r.value.as_str())
        .collect();
    // "racecar" and "a" contain 'a' and are palindromes; "civic" has no 'a'.
    assert_eq!(values, vec!["racecar", "a"]);
}

#[test]
fn nl_query_failure_carries_the_input() {
    let err = interpret("banana bread").unwrap_err();
    assert_eq!(
        err,
        QueryError::NotUnderstood {
            query: "banana bread".to_string()
        }
    );
}

#[test]
fn both_query_paths_share_evaluation_semantics() {
    let store = seeded_store();

    let interpreted = interpret("single word strings longer than 4").unwrap();
    let structured = PredicateSet {
        word_count: Some(1),
        min_length: Some(5),
        ..Default::default()
    };
    assert_eq!(interpreted, structured);

    let via_nl = evaluate(&store, &interpreted);
    let via_api = evaluate(&store, &structured);
    assert_eq!(via_nl, via_api);

    let values: Vec<&str> = via_api.iter().map(|r| r.value.as_str()).collect();
    assert_eq!(values, vec!["banana", "civic", "racecar"]);
}

#[test]
fn evaluation_never_recomputes_properties() {
    // Stored properties are authoritative: a record observed through two
    // different predicate paths is the same record.
    let store = seeded_store();

    let all = evaluate(&store, &PredicateSet::new());
    let palindromes = evaluate(
        &store,
        &PredicateSet {
            is_palindrome: Some(true),
            ..Default::default()
        },
    );
    for record in palindromes {
        let same = all.iter().find(|r| r.id == record.id).unwrap();
        assert_eq!(*same, record);
    }
}

#[test]
fn contains_character_acceptance_example() {
    let mut store = InMemoryStore::new();
    store.insert("banana").unwrap();
    store.insert("civic").unwrap();

    let predicates = PredicateSet {
        contains_character: Some("a".to_string()),
        ..Default::default()
    };
    let results = evaluate(&store, &predicates);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].value, "banana");
}
