//! Stringdex query layer
//!
//! This crate defines the structured filter model (`PredicateSet`) and the
//! heuristic natural-language interpreter that compiles free-text filter
//! requests into it.
//!
//! Both the direct structured path and the interpreted path produce the same
//! `PredicateSet` type, so evaluation semantics cannot drift between them.

pub mod nlq;
pub mod predicate;

pub use nlq::{interpret, Interpreter};
pub use predicate::{InterpretedQuery, PredicateSet, QueryError};
