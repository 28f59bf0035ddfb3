//! Structured filter predicates.
//!
//! A `PredicateSet` is an AND-composed collection of named constraints, at
//! most one per name. Absent constraints impose no restriction. An empty set
//! is only ever an error signal out of the interpreter; the structured path
//! never treats it as "match all".

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A set of filter constraints, combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateSet {
    /// Record's palindrome flag must equal this exactly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,
    /// Record's length must be >= this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Record's length must be <= this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Record's word count must equal this exactly (not a range).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    /// Record's raw value must contain this single character.
    ///
    /// Stored as a `String` so a malformed (multi-char) value coming from an
    /// unvalidated boundary still has a defined path through the evaluator:
    /// it matches nothing rather than panicking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<String>,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no constraint is present.
    pub fn is_empty(&self) -> bool {
        self.is_palindrome.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.word_count.is_none()
            && self.contains_character.is_none()
    }

    /// Shape-check the set at the service boundary.
    ///
    /// The only shape constraint today is that `contains_character` must be
    /// exactly one character. A `min_length` above `max_length` is *not*
    /// malformed: it is a well-formed query whose result is empty.
    pub fn validate(&self) -> Result<(), QueryError> {
        if let Some(ch) = &self.contains_character {
            if ch.chars().count() != 1 {
                return Err(QueryError::MalformedConstraint {
                    field: "contains_character",
                    reason: format!("expected exactly one character, got {:?}", ch),
                });
            }
        }
        Ok(())
    }
}

/// A free-text query paired with the predicates derived from it.
///
/// Kept for observability (echoed back to the caller); evaluation only ever
/// consumes the `predicates` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretedQuery {
    pub original: String,
    pub predicates: PredicateSet,
}

/// Errors on the query path. All recoverable at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The interpreter found no applicable pattern. Carries the original
    /// input for diagnostics; never silently defaulted to match-all.
    #[error("unable to interpret query: {query:?}")]
    NotUnderstood { query: String },

    /// A structured constraint failed its shape check.
    #[error("malformed constraint `{field}`: {reason}")]
    MalformedConstraint {
        field: &'static str,
        reason: String,
    },
}
