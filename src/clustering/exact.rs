use crate::clustering::MergeStats;
use crate::core::table::FrequencyTable;
use crate::index::builder::SequenceIndex;

/// Fold every indexed sequence that occurs as an exact substring of a longer
/// sequence into that longer sequence.
///
/// Sequences are visited longest first, so each substring lands on the
/// longest sequence containing it. `index` should be a single-resolution
/// index built from `table`; only the keys it holds are considered.
pub fn collapse_exact_substrings(table: &mut FrequencyTable, index: &SequenceIndex) -> MergeStats {
    let mut stats = MergeStats::default();

    for seq in table.sequences_longest_first() {
        stats.examined += 1;
        let bytes = seq.as_bytes();

        for hit in index.find_in(bytes) {
            if hit.len() == bytes.len() {
                continue;
            }
            let matched = String::from_utf8_lossy(&bytes[hit.start..hit.end]);
            let moved = table.transfer(&matched, &seq);
            stats.record(moved);
        }
    }

    stats
}
