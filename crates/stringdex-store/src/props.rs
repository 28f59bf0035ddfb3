//! Derived string properties.
//!
//! Pure functions over the raw value; a record's properties are computed
//! exactly once at insert time and never recomputed. Evaluation reads them
//! verbatim from the stored record, so the definitions here *are* the
//! predicate semantics for the property-backed constraints.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The full property bundle for one string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringProperties {
    /// Number of Unicode scalar values.
    pub length: usize,
    /// True iff the value reads the same forwards and backwards after
    /// removing all whitespace and lowercasing.
    pub is_palindrome: bool,
    /// Distinct characters, whitespace included, case-sensitive.
    pub unique_characters: usize,
    /// Maximal runs of non-whitespace characters.
    pub word_count: usize,
    /// Lowercase-hex SHA-256 of the exact UTF-8 value. Doubles as the
    /// record's content-addressed identity.
    pub sha256_hash: String,
    /// Character -> occurrence count.
    pub character_frequency_map: HashMap<char, usize>,
}

/// Compute the whole bundle for a value.
pub fn extract(value: &str) -> StringProperties {
    StringProperties {
        length: value.chars().count(),
        is_palindrome: is_palindrome(value),
        unique_characters: unique_characters(value),
        word_count: word_count(value),
        sha256_hash: sha256_hex(value),
        character_frequency_map: char_frequency_map(value),
    }
}

/// Lowercase-hex SHA-256 over the UTF-8 bytes.
pub fn sha256_hex(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(64);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Palindrome test: drop whitespace, lowercase, compare with the reverse.
pub fn is_palindrome(value: &str) -> bool {
    let cleaned: Vec<char> = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .collect();
    cleaned.iter().eq(cleaned.iter().rev())
}

/// Distinct characters, case-sensitive, whitespace included.
pub fn unique_characters(value: &str) -> usize {
    let mut seen: Vec<char> = value.chars().collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

/// Maximal runs of non-whitespace characters.
pub fn word_count(value: &str) -> usize {
    value.split_whitespace().count()
}

/// Character -> occurrence count.
pub fn char_frequency_map(value: &str) -> HashMap<char, usize> {
    let mut freq = HashMap::new();
    for ch in value.chars() {
        *freq.entry(ch).or_insert(0) += 1;
    }
    freq
}
