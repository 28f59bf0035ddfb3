//! Stringdex record store
//!
//! Content-addressed storage for analyzed strings:
//!
//! ```text
//! raw value ──► props::extract ──► Record ──► RecordStore (keyed by SHA-256)
//!                                                  │
//! free text ──► stringdex_query::interpret ──► PredicateSet
//!                                                  │
//!                                    evaluator::evaluate ──► matching records
//! ```
//!
//! ## Key properties
//!
//! - **Immutable records**: properties are a pure function of the value,
//!   computed once at insert and never mutated. There is no update operation.
//! - **All-or-nothing mutation**: a rejected insert or delete leaves the
//!   store untouched.
//! - **Injectable**: the store is an explicit value owned by the caller's
//!   composition root, never a module-level singleton, so tests can
//!   instantiate isolated stores.
//!
//! The store itself defines no locking discipline; callers running it under
//! concurrent request handling must serialize mutation externally.

pub mod evaluator;
pub mod props;


use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use evaluator::{evaluate, matches};
pub use props::{extract, StringProperties};

// ============================================================================
// Core Types
// ============================================================================

/// A stored string with its derived properties and creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Content-addressed identity: lowercase-hex SHA-256 of `value`.
    pub id: String,
    /// The exact string as ingested. Immutable once stored.
    pub value: String,
    /// Derived properties, computed once at insert.
    pub properties: StringProperties,
    /// UTC creation time, set once.
    pub created_at: DateTime<Utc>,
}

/// Store errors. All recoverable: the store is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Insert attempted for a value already present (same content hash).
    #[error("record already exists (hash {hash})")]
    DuplicateRecord { hash: String },

    /// Lookup or delete for an absent value.
    #[error("record not found (hash {hash})")]
    RecordNotFound { hash: String },
}

// ============================================================================
// Store Abstraction
// ============================================================================

/// Content-addressed record storage.
///
/// Operations are keyed by the raw value; implementations hash internally.
/// Enumeration visits each record exactly once, in insertion order.
pub trait RecordStore {
    /// Insert-if-absent. Returns the created record, or `DuplicateRecord`
    /// without touching the store.
    fn insert(&mut self, value: &str) -> Result<Record, StoreError>;

    /// Look up the record for a value, if present.
    fn lookup(&self, value: &str) -> Option<&Record>;

    /// Remove and return the record for a value, or `RecordNotFound`.
    fn remove(&mut self, value: &str) -> Result<Record, StoreError>;

    /// All records, in insertion order.
    fn records(&self) -> Vec<&Record>;

    /// Number of stored records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// In-Memory Store
// ============================================================================

/// The default in-process store: a hash map plus an insertion-order index
/// kept in lockstep.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// hash -> record
    records: HashMap<String, Record>,
    /// Insertion order of hashes; always consistent with `records`.
    order: Vec<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for InMemoryStore {
    fn insert(&mut self, value: &str) -> Result<Record, StoreError> {
        let properties = props::extract(value);
        let hash = properties.sha256_hash.clone();

        if self.records.contains_key(&hash) {
            tracing::debug!(hash = %hash, "duplicate insert rejected");
            return Err(StoreError::DuplicateRecord { hash });
        }

        let record = Record {
            id: hash.clone(),
            value: value.to_string(),
            properties,
            created_at: Utc::now(),
        };

        self.records.insert(hash.clone(), record.clone());
        self.order.push(hash.clone());
        tracing::debug!(hash = %hash, length = record.properties.length, "record inserted");
        Ok(record)
    }

    fn lookup(&self, value: &str) -> Option<&Record> {
        self.records.get(&props::sha256_hex(value))
    }

    fn remove(&mut self, value: &str) -> Result<Record, StoreError> {
        let hash = props::sha256_hex(value);
        let Some(record) = self.records.remove(&hash) else {
            tracing::debug!(hash = %hash, "delete for absent record");
            return Err(StoreError::RecordNotFound { hash });
        };
        self.order.retain(|h| h != &hash);
        tracing::debug!(hash = %hash, "record deleted");
        Ok(record)
    }

    fn records(&self) -> Vec<&Record> {
        self.order
            .iter()
            .filter_map(|hash| self.records.get(hash))
            .collect()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
