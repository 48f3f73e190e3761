//! Centralized validation and helper functions.

use crate::core::sequence::is_nucleotide;

/// Maximum number of distinct sequences allowed in a single table (DOS protection)
pub const MAX_SEQUENCES: usize = 10_000_000;

/// Maximum length of a single sequence
pub const MAX_SEQUENCE_LENGTH: usize = 100_000;

/// Validate that a string is a non-empty nucleotide sequence of acceptable length.
///
/// # Examples
///
/// ```
/// use iqseq::utils::validation::is_valid_sequence;
///
/// assert!(is_valid_sequence("ACGTN"));
/// assert!(!is_valid_sequence("acgt")); // lowercase must be normalized first
/// assert!(!is_valid_sequence("ACGU"));
/// assert!(!is_valid_sequence(""));
/// ```
#[must_use]
pub fn is_valid_sequence(s: &str) -> bool {
    !s.is_empty() && s.len() <= MAX_SEQUENCE_LENGTH && s.bytes().all(is_nucleotide)
}

/// Uppercase a sequence and validate it.
/// Returns None if the result is not a valid sequence.
#[must_use]
pub fn normalize_sequence(s: &str) -> Option<String> {
    let upper = s.trim().to_ascii_uppercase();
    if is_valid_sequence(&upper) {
        Some(upper)
    } else {
        None
    }
}

/// Check if adding another sequence would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new sequence.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_sequence_limit(count: usize) -> Option<String> {
    if count >= MAX_SEQUENCES {
        Some(format!(
            "Too many sequences: adding another would exceed maximum of {MAX_SEQUENCES}"
        ))
    } else {
        None
    }
}
