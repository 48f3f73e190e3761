/// Nucleotide symbols accepted in a sequence.
pub const ALPHABET: &[u8] = b"ACGTN";

/// Check whether a byte is one of the accepted nucleotide symbols (uppercase only).
#[inline]
#[must_use]
pub fn is_nucleotide(base: u8) -> bool {
    ALPHABET.contains(&base)
}

/// Truncate a sequence to the largest multiple of `base` not exceeding its length.
///
/// A `base` of zero or one leaves the sequence untouched.
///
/// # Examples
///
/// ```
/// use iqseq::core::sequence::trim_to_multiple;
///
/// assert_eq!(trim_to_multiple("ACGTACG", 4), "ACGT");
/// assert_eq!(trim_to_multiple("ACGTACGT", 4), "ACGTACGT");
/// assert_eq!(trim_to_multiple("ACG", 4), "");
/// ```
#[must_use]
pub fn trim_to_multiple(seq: &str, base: usize) -> &str {
    if base <= 1 {
        return seq;
    }
    let keep = (seq.len() / base) * base;
    // Sequences are ASCII once validated, but never slice inside a char
    if seq.is_char_boundary(keep) {
        &seq[..keep]
    } else {
        seq
    }
}

/// Compare two sequences by length (longest first), then lexicographically.
///
/// This is the processing order used by every index builder and collapser.
#[must_use]
pub fn longest_first(a: &str, b: &str) -> std::cmp::Ordering {
    b.len().cmp(&a.len()).then_with(|| a.cmp(b))
}
