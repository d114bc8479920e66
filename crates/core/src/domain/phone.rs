// Phone Number Domain Model
//
// Numbers are compared and dispatched in whitespace-stripped form. Validation
// always runs on the stripped string, so "+91 98765 43210" is accepted as
// "+919876543210".

use crate::domain::error::{DomainError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// `+` followed by 8-15 ASCII digits, first digit non-zero
static E164_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9][0-9]{7,14}$").expect("e164 regex"));

/// Delimiters accepted between pasted numbers
const NUMBER_DELIMITERS: [char; 3] = ['\n', ',', ';'];

/// A validated E.164-like phone number (whitespace already stripped)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Strip whitespace, then validate
    pub fn parse(raw: impl AsRef<str>) -> Result<Self> {
        let cleaned = normalize(raw.as_ref());
        if is_valid_e164(&cleaned) {
            Ok(Self(cleaned))
        } else {
            Err(DomainError::InvalidPhoneNumber(raw.as_ref().to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

/// Remove every whitespace character
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// E.164-like check on the whitespace-stripped input
pub fn is_valid_e164(raw: &str) -> bool {
    E164_RE.is_match(&normalize(raw))
}

/// Split pasted/uploaded text into trimmed, non-empty fragments
///
/// Order and duplicates are preserved.
pub fn split_numbers(text: &str) -> Vec<String> {
    text.split(&NUMBER_DELIMITERS[..])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Result of analysing a block of pasted numbers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NumberAnalysis {
    pub count_raw: usize,
    pub count_unique: usize,
    pub valid: Vec<PhoneNumber>,
    pub invalid: Vec<String>,
}

impl NumberAnalysis {
    /// At least one valid number to call
    pub fn is_dispatchable(&self) -> bool {
        !self.valid.is_empty()
    }
}

/// Parse, dedupe (first-seen order) and partition numbers into valid/invalid
pub fn analyze_numbers(text: &str) -> NumberAnalysis {
    let raw = split_numbers(text);

    let mut seen = HashSet::with_capacity(raw.len());
    let unique: Vec<String> = raw
        .iter()
        .map(|fragment| normalize(fragment))
        .filter(|n| seen.insert(n.clone()))
        .collect();

    let count_unique = unique.len();
    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    for number in unique {
        if E164_RE.is_match(&number) {
            valid.push(PhoneNumber(number));
        } else {
            invalid.push(number);
        }
    }

    NumberAnalysis {
        count_raw: raw.len(),
        count_unique,
        valid,
        invalid,
    }
}
