use tracing::trace;

use crate::clustering::config::ClusterConfig;
use crate::clustering::matches::rank_hits;
use crate::clustering::progress::{ProgressSchedule, ProgressSink};
use crate::clustering::MergeStats;
use crate::core::table::FrequencyTable;
use crate::index::builder::SequenceIndex;

/// Merge every sequence into the first near neighbour the index offers.
///
/// Sequences are visited longest first; those already emptied by an earlier
/// merge are skipped. For each remaining sequence the index is queried within
/// `config.mismatches` and hits are ranked (see
/// [`rank_hits`](crate::clustering::matches::rank_hits)). The first hit that
/// is not the sequence itself receives the sequence's whole count, even if
/// that destination was emptied earlier in the pass: a `Canonical` hit
/// receives it directly, a `SubsequenceOf` hit routes it to the longer
/// sequence the window belongs to.
///
/// `index` should be a multi-resolution index built from `table`.
pub fn cluster_similar(
    table: &mut FrequencyTable,
    index: &SequenceIndex,
    config: &ClusterConfig,
    progress: &mut dyn ProgressSink,
) -> MergeStats {
    let sequences = table.sequences_longest_first();
    let total = sequences.len();
    let mut schedule = ProgressSchedule::new();
    let mut stats = MergeStats::default();

    for (i, seq) in sequences.iter().enumerate() {
        if schedule.is_due(i + 1) {
            progress.report("similar", i + 1, total);
        }
        if table.get(seq) == 0 {
            continue;
        }
        stats.examined += 1;

        let hits = index.approximate(seq.as_bytes(), config.mismatches, config.metric);
        for hit in rank_hits(hits) {
            if hit.distance == 0 {
                continue;
            }
            let key = String::from_utf8_lossy(&hit.key);
            let destination = hit.value.destination(&key);
            // A window of this very sequence would route back onto it
            if key == seq.as_str() || destination == seq.as_str() {
                continue;
            }

            let moved = table.transfer(seq, destination);
            trace!(from = %seq, to = destination, moved, distance = hit.distance, "merged");
            stats.record(moved);
            // The sequence is empty now; later hits would move nothing
            break;
        }
    }

    stats
}
