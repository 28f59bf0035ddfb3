//! Predicate evaluation over the record store.
//!
//! Applies a `PredicateSet` — structured or interpreted, the semantics are
//! identical — against every stored record. AND composition: a record matches
//! iff every *present* constraint passes; absent constraints impose no
//! restriction. Properties are read verbatim from the record, never
//! recomputed.

use stringdex_query::PredicateSet;

use crate::{Record, RecordStore};

/// True iff `record` satisfies every present constraint.
pub fn matches(record: &Record, predicates: &PredicateSet) -> bool {
    let props = &record.properties;

    if let Some(want) = predicates.is_palindrome {
        if props.is_palindrome != want {
            return false;
        }
    }

    if let Some(min) = predicates.min_length {
        if props.length < min {
            return false;
        }
    }

    if let Some(max) = predicates.max_length {
        if props.length > max {
            return false;
        }
    }

    if let Some(count) = predicates.word_count {
        if props.word_count != count {
            return false;
        }
    }

    if let Some(needle) = &predicates.contains_character {
        // Substring test against the raw value, not the frequency map. A
        // malformed constraint (empty or multi-char) should have been
        // rejected at the boundary; here it simply matches nothing.
        if needle.chars().count() != 1 || !record.value.contains(needle.as_str()) {
            return false;
        }
    }

    true
}

/// All matching records, once each, in the store's enumeration order.
pub fn evaluate<'a>(
    store: &'a dyn RecordStore,
    predicates: &PredicateSet,
) -> Vec<&'a Record> {
    store
        .records()
        .into_iter()
        .filter(|record| matches(record, predicates))
        .collect()
}
