use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::core::sequence::longest_first;

/// Mapping from sequence to occurrence count.
///
/// Merges never remove keys: a sequence whose mass moved elsewhere stays in the
/// table with a count of zero, so the key domain is stable across a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
}

/// Reference bins share the table representation; every bin starts at zero.
pub type BinTable = FrequencyTable;

impl FrequencyTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table where every given sequence is present with a count of zero
    pub fn seeded<I, S>(sequences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            counts: sequences.into_iter().map(|s| (s.into(), 0)).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[must_use]
    pub fn contains(&self, seq: &str) -> bool {
        self.counts.contains_key(seq)
    }

    /// Current count for a sequence; absent sequences count as zero.
    #[must_use]
    pub fn get(&self, seq: &str) -> u64 {
        self.counts.get(seq).copied().unwrap_or(0)
    }

    /// Set the count for a sequence, returning the previous count if any
    pub fn insert(&mut self, seq: impl Into<String>, count: u64) -> Option<u64> {
        self.counts.insert(seq.into(), count)
    }

    /// Add `amount` to a sequence, creating it if needed
    pub fn add(&mut self, seq: &str, amount: u64) {
        if let Some(count) = self.counts.get_mut(seq) {
            *count += amount;
        } else {
            self.counts.insert(seq.to_string(), amount);
        }
    }

    /// Record one more occurrence of a sequence
    pub fn increment(&mut self, seq: &str) {
        self.add(seq, 1);
    }

    /// Zero a sequence's count and return what it held.
    ///
    /// The key is kept. Absent sequences are not created.
    pub fn take(&mut self, seq: &str) -> u64 {
        self.counts.get_mut(seq).map_or(0, std::mem::take)
    }

    /// Move the whole count of `from` onto `to`, returning the amount moved.
    ///
    /// Moving a sequence onto itself is a no-op.
    pub fn transfer(&mut self, from: &str, to: &str) -> u64 {
        if from == to {
            return 0;
        }
        let moved = self.take(from);
        self.add(to, moved);
        moved
    }

    /// Sum of all counts
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of sequences with a non-zero count
    #[must_use]
    pub fn non_zero_len(&self) -> usize {
        self.counts.values().filter(|&&c| c > 0).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(s, &c)| (s.as_str(), c))
    }

    /// Sequences sorted longest first, ties broken lexicographically.
    ///
    /// The returned list is a snapshot, so the table can be mutated while
    /// walking it.
    #[must_use]
    pub fn sequences_longest_first(&self) -> Vec<String> {
        let mut seqs: Vec<String> = self.counts.keys().cloned().collect();
        seqs.sort_by(|a, b| longest_first(a, b));
        seqs
    }

    /// Sorted distinct sequence lengths
    #[must_use]
    pub fn distinct_lengths(&self) -> Vec<usize> {
        self.counts
            .keys()
            .map(String::len)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl FromIterator<(String, u64)> for FrequencyTable {
    fn from_iter<T: IntoIterator<Item = (String, u64)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (seq, count) in iter {
            table.add(&seq, count);
        }
        table
    }
}

impl<'a> FromIterator<(&'a str, u64)> for FrequencyTable {
    fn from_iter<T: IntoIterator<Item = (&'a str, u64)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (seq, count) in iter {
            table.add(seq, count);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, u64)]) -> FrequencyTable {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_get_absent_is_zero() {
        let t = table(&[("ACGT", 3)]);
        assert_eq!(t.get("ACGT"), 3);
        assert_eq!(t.get("TTTT"), 0);
        assert!(!t.contains("TTTT"));
    }

    #[test]
    fn test_take_keeps_key() {
        let mut t = table(&[("ACGT", 3)]);
        assert_eq!(t.take("ACGT"), 3);
        assert!(t.contains("ACGT"));
        assert_eq!(t.get("ACGT"), 0);
        assert_eq!(t.take("ACGT"), 0);
    }

    #[test]
    fn test_take_absent_does_not_insert() {
        let mut t = FrequencyTable::new();
        assert_eq!(t.take("ACGT"), 0);
        assert!(t.is_empty());
    }

    #[test]
    fn test_transfer_conserves_total() {
        let mut t = table(&[("AAAA", 3), ("AAAAGG", 2)]);
        let before = t.total();
        assert_eq!(t.transfer("AAAA", "AAAAGG"), 3);
        assert_eq!(t.get("AAAAGG"), 5);
        assert_eq!(t.get("AAAA"), 0);
        assert_eq!(t.total(), before);
    }

    #[test]
    fn test_transfer_onto_self_is_noop() {
        let mut t = table(&[("AAAA", 3)]);
        assert_eq!(t.transfer("AAAA", "AAAA"), 0);
        assert_eq!(t.get("AAAA"), 3);
    }

    #[test]
    fn test_duplicate_entries_are_summed() {
        let t = table(&[("AAAA", 3), ("AAAA", 2)]);
        assert_eq!(t.get("AAAA"), 5);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_sequences_longest_first() {
        let t = table(&[("TTTT", 5), ("AAAAGG", 2), ("AAAA", 3)]);
        assert_eq!(t.sequences_longest_first(), vec!["AAAAGG", "AAAA", "TTTT"]);
    }

    #[test]
    fn test_distinct_lengths() {
        let t = table(&[("TTTT", 5), ("AAAAGG", 2), ("AAAA", 3)]);
        assert_eq!(t.distinct_lengths(), vec![4, 6]);
    }

    #[test]
    fn test_seeded_bins() {
        let bins = BinTable::seeded(["ACGT", "TGCA"]);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins.total(), 0);
        assert_eq!(bins.non_zero_len(), 0);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let t = table(&[("ACGT", 4)]);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"ACGT":4}"#);
    }
}
