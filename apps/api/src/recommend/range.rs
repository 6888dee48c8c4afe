//! Numeric extraction and range normalization for user preferences and catalog fields.
//!
//! Parsing never fails: anything without a usable number collapses to `0` / `(0, 0)`,
//! which the range filter then treats like any other bound.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("numeric pattern is valid"));

/// Inclusive `(min, max)` bounds. `min > max` is legal and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub min: i64,
    pub max: i64,
}

impl Range {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn single(value: i64) -> Self {
        Self::new(value, value)
    }

    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Raw range input as it arrives in a request body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RangeInput {
    Int(i64),
    /// Integers past `i64::MAX`; saturated like oversized digit runs.
    Big(u64),
    Text(String),
    /// Floats, booleans, arrays, objects.
    Unsupported(serde_json::Value),
}

/// Normalizes a preference value into an inclusive range.
///
/// - integer `v` → `(v, v)`
/// - text with two numbers → `(first, second)` in order of appearance
/// - text with one number → `(v, v)`
/// - anything else → `(0, 0)`
pub fn parse_range(input: &RangeInput) -> Range {
    match input {
        RangeInput::Int(v) => Range::single(*v),
        RangeInput::Big(_) => Range::single(i64::MAX),
        RangeInput::Text(text) => {
            let parts: Vec<i64> = NUMBER_RE
                .find_iter(text)
                .map(|m| parse_digits(m.as_str()))
                .collect();
            match parts.as_slice() {
                [min, max] => Range::new(*min, *max),
                [value] => Range::single(*value),
                _ => Range::single(0),
            }
        }
        RangeInput::Unsupported(_) => Range::single(0),
    }
}

/// First run of digits in `value`, or `0` if there is none.
pub fn extract_numeric(value: &str) -> i64 {
    NUMBER_RE
        .find(value)
        .map(|m| parse_digits(m.as_str()))
        .unwrap_or(0)
}

// Digit runs too long for i64 saturate instead of failing.
fn parse_digits(digits: &str) -> i64 {
    digits.parse::<i64>().unwrap_or(i64::MAX)
}
