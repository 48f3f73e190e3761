use std::sync::Arc;
use tracing::debug;

use crate::core::table::FrequencyTable;
use crate::index::trie::Trie;

/// What a key in a [`SequenceIndex`] stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieEntry {
    /// The key is a full sequence of the indexed table, with its count at build time
    Canonical(u64),
    /// The key is a window of the given longer sequence
    SubsequenceOf(Arc<str>),
}

impl TrieEntry {
    /// The table key that merges routed through this entry should land on.
    ///
    /// `key` is the string this entry was found under.
    #[must_use]
    pub fn destination<'a>(&'a self, key: &'a str) -> &'a str {
        match self {
            Self::Canonical(_) => key,
            Self::SubsequenceOf(parent) => parent,
        }
    }

    #[must_use]
    pub fn is_canonical(&self) -> bool {
        matches!(self, Self::Canonical(_))
    }
}

/// Prefix trie over sequences and, optionally, their windows
pub type SequenceIndex = Trie<TrieEntry>;

/// Index every full sequence of the table as a `Canonical` entry.
#[must_use]
pub fn build_single_resolution(table: &FrequencyTable) -> SequenceIndex {
    let mut index = SequenceIndex::new();
    for (seq, count) in table.iter() {
        index.insert_if_absent(seq.as_bytes(), TrieEntry::Canonical(count));
    }

    debug!(
        sequences = table.len(),
        keys = index.len(),
        "Built single-resolution index"
    );
    index
}

/// Index every sequence plus every window of every registered length.
///
/// `lengths` defaults to the distinct sequence lengths of the table. Zero
/// lengths are ignored.
///
/// Keys are claimed first writer wins, in two passes over the sequences
/// (longest first, ties lexicographic):
///
/// 1. every sequence whose own length is registered claims its key as
///    [`TrieEntry::Canonical`];
/// 2. every window shorter than its sequence, for each registered length,
///    claims its key as [`TrieEntry::SubsequenceOf`] that sequence if the
///    key is still free.
///
/// A full sequence therefore always owns its own key, and a window shared by
/// several sequences points at the longest of them.
#[must_use]
pub fn build_multi_resolution(table: &FrequencyTable, lengths: Option<&[usize]>) -> SequenceIndex {
    let lengths = window_lengths(table, lengths);
    let sequences = table.sequences_longest_first();
    let mut index = SequenceIndex::new();

    for seq in &sequences {
        if lengths.binary_search(&seq.len()).is_ok() {
            let claimed =
                index.insert_if_absent(seq.as_bytes(), TrieEntry::Canonical(table.get(seq)));
            // Table keys are unique and claimed before any window
            assert!(claimed, "sequence {seq} was indexed twice");
        }
    }

    let mut windows = 0usize;
    for seq in &sequences {
        let parent: Arc<str> = Arc::from(seq.as_str());
        for &len in lengths.iter().filter(|&&len| len < seq.len()) {
            for window in seq.as_bytes().windows(len) {
                if index.insert_if_absent(window, TrieEntry::SubsequenceOf(Arc::clone(&parent))) {
                    windows += 1;
                }
            }
        }
    }

    debug!(
        sequences = sequences.len(),
        lengths = ?lengths,
        windows,
        keys = index.len(),
        nodes = index.node_count(),
        "Built multi-resolution index"
    );
    index
}

/// Window lengths to register: the explicit list if given, otherwise the
/// table's distinct sequence lengths. Always sorted, deduplicated, non-zero.
#[must_use]
pub fn window_lengths(table: &FrequencyTable, explicit: Option<&[usize]>) -> Vec<usize> {
    let mut lengths = match explicit {
        Some(lengths) => lengths.to_vec(),
        None => table.distinct_lengths(),
    };
    lengths.retain(|&len| len > 0);
    lengths.sort_unstable();
    lengths.dedup();
    lengths
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, u64)]) -> FrequencyTable {
        entries.iter().copied().collect()
    }

    fn parent(index: &SequenceIndex, key: &str) -> Option<String> {
        match index.get(key.as_bytes()) {
            Some(TrieEntry::SubsequenceOf(p)) => Some(p.to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_single_resolution_indexes_full_sequences_only() {
        let t = table(&[("AAAA", 3), ("AAAAGG", 2)]);
        let index = build_single_resolution(&t);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(b"AAAA"), Some(&TrieEntry::Canonical(3)));
        assert_eq!(index.get(b"AAAAGG"), Some(&TrieEntry::Canonical(2)));
        assert!(!index.contains_key(b"AAAG"));
    }

    #[test]
    fn test_multi_resolution_scenario() {
        let t = table(&[("AAAA", 3), ("AAAAGG", 2), ("TTTT", 5)]);
        let index = build_multi_resolution(&t, Some(&[4, 6]));

        assert_eq!(index.get(b"AAAAGG"), Some(&TrieEntry::Canonical(2)));
        assert_eq!(index.get(b"AAAA"), Some(&TrieEntry::Canonical(3)));
        assert_eq!(index.get(b"TTTT"), Some(&TrieEntry::Canonical(5)));
        assert_eq!(parent(&index, "AAAG").as_deref(), Some("AAAAGG"));
        assert_eq!(parent(&index, "AAGG").as_deref(), Some("AAAAGG"));
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn test_full_sequence_beats_longer_sequences_window() {
        // The 4-window AAAA of AAAAGG is seen before AAAA itself in length order
        let t = table(&[("AAAAGG", 2), ("AAAA", 3)]);
        let index = build_multi_resolution(&t, None);
        assert!(index.get(b"AAAA").is_some_and(TrieEntry::is_canonical));
    }

    #[test]
    fn test_shared_window_points_at_longest_sequence() {
        let t = table(&[("ACGTAC", 1), ("TTACGT", 1), ("ACGTACGA", 1)]);
        let index = build_multi_resolution(&t, Some(&[4, 6, 8]));
        assert_eq!(parent(&index, "ACGT").as_deref(), Some("ACGTACGA"));
        // Only TTACGT contains TTAC
        assert_eq!(parent(&index, "TTAC").as_deref(), Some("TTACGT"));
    }

    #[test]
    fn test_unregistered_own_length_is_not_canonical() {
        let t = table(&[("AAAAGG", 2)]);
        let index = build_multi_resolution(&t, Some(&[4]));
        assert!(!index.contains_key(b"AAAAGG"));
        assert_eq!(parent(&index, "AAAA").as_deref(), Some("AAAAGG"));
    }

    #[test]
    fn test_window_lengths() {
        let t = table(&[("AAAA", 3), ("AAAAGG", 2), ("TTTT", 5)]);
        assert_eq!(window_lengths(&t, None), vec![4, 6]);
        assert_eq!(window_lengths(&t, Some(&[6, 0, 4, 6])), vec![4, 6]);
    }

    #[test]
    fn test_empty_table() {
        let t = FrequencyTable::new();
        assert!(build_single_resolution(&t).is_empty());
        assert!(build_multi_resolution(&t, None).is_empty());
    }

    #[test]
    fn test_destination() {
        let canonical = TrieEntry::Canonical(3);
        assert_eq!(canonical.destination("AAAA"), "AAAA");
        let sub = TrieEntry::SubsequenceOf(Arc::from("AAAAGG"));
        assert_eq!(sub.destination("AAAA"), "AAAAGG");
    }
}
