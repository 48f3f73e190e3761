use tracing::trace;

use crate::clustering::config::ClusterConfig;
use crate::clustering::matches::rank_hits;
use crate::clustering::progress::{ProgressSchedule, ProgressSink};
use crate::clustering::MergeStats;
use crate::core::table::{BinTable, FrequencyTable};
use crate::index::builder::SequenceIndex;

/// Route each sample sequence's count into the first bin it approximately
/// matches.
///
/// `index` is a multi-resolution index built over `bins`. Sample sequences
/// are visited longest first and matched within `config.mismatches`; the best
/// ranked hit decides the bin (a window hit routes to the bin it was cut
/// from). The sample sequence is zeroed once its count has been routed.
/// Exact (distance 0) hits are accepted. Sample sequences with no hit keep
/// their count.
pub fn classify_into_bins(
    bins: &mut BinTable,
    sample: &mut FrequencyTable,
    index: &SequenceIndex,
    config: &ClusterConfig,
    progress: &mut dyn ProgressSink,
) -> MergeStats {
    let sequences = sample.sequences_longest_first();
    let total = sequences.len();
    let mut schedule = ProgressSchedule::new();
    let mut stats = MergeStats::default();

    for (i, seq) in sequences.iter().enumerate() {
        if schedule.is_due(i + 1) {
            progress.report("bins", i + 1, total);
        }
        stats.examined += 1;

        let hits = index.approximate(seq.as_bytes(), config.mismatches, config.metric);
        if let Some(hit) = rank_hits(hits).into_iter().next() {
            let key = String::from_utf8_lossy(&hit.key);
            let bin = hit.value.destination(&key);
            let moved = sample.take(seq);
            bins.add(bin, moved);
            trace!(sequence = %seq, bin, moved, distance = hit.distance, "binned");
            stats.record(moved);
        }
    }

    stats
}
