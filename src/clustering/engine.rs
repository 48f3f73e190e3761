use tracing::info;

use crate::clustering::bins::classify_into_bins;
use crate::clustering::config::ClusterConfig;
use crate::clustering::exact::collapse_exact_substrings;
use crate::clustering::progress::{NoProgress, ProgressSink, TracingProgress};
use crate::clustering::similar::cluster_similar;
use crate::clustering::MergeStats;
use crate::core::table::{BinTable, FrequencyTable};
use crate::index::builder::{build_multi_resolution, build_single_resolution};

/// Runs each clustering pass with a freshly built index.
///
/// The index lives only for the duration of one call.
#[derive(Debug, Clone, Default)]
pub struct ClusteringEngine {
    config: ClusterConfig,
}

impl ClusteringEngine {
    /// Create a new engine with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new engine with custom configuration
    #[must_use]
    pub fn with_config(config: ClusterConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Fold exact substrings into their longest containing sequence
    pub fn collapse_exact(&self, table: &mut FrequencyTable) -> MergeStats {
        let index = build_single_resolution(table);
        let stats = collapse_exact_substrings(table, &index);
        info!(
            "Exact substring collapse: {} merges, {} reads moved",
            stats.merges, stats.mass_moved
        );
        stats
    }

    /// Merge near-duplicate and near-containing sequences
    pub fn cluster_similar(&self, table: &mut FrequencyTable) -> MergeStats {
        let mut sink = self.default_sink();
        self.cluster_similar_with(table, sink.as_mut())
    }

    /// [`Self::cluster_similar`] reporting progress to the given sink
    pub fn cluster_similar_with(
        &self,
        table: &mut FrequencyTable,
        progress: &mut dyn ProgressSink,
    ) -> MergeStats {
        let index = build_multi_resolution(table, self.config.window_lengths.as_deref());
        let stats = cluster_similar(table, &index, &self.config, progress);
        info!(
            "Approximate clustering (max distance {}): {} merges, {} reads moved",
            self.config.mismatches, stats.merges, stats.mass_moved
        );
        stats
    }

    /// Classify a sample against reference bins
    pub fn classify(&self, bins: &mut BinTable, sample: &mut FrequencyTable) -> MergeStats {
        let mut sink = self.default_sink();
        self.classify_with(bins, sample, sink.as_mut())
    }

    /// [`Self::classify`] reporting progress to the given sink
    pub fn classify_with(
        &self,
        bins: &mut BinTable,
        sample: &mut FrequencyTable,
        progress: &mut dyn ProgressSink,
    ) -> MergeStats {
        let index = build_multi_resolution(bins, self.config.window_lengths.as_deref());
        let stats = classify_into_bins(bins, sample, &index, &self.config, progress);
        info!(
            "Bin classification: {} of {} sequences binned, {} reads assigned",
            stats.merges, stats.examined, stats.mass_moved
        );
        stats
    }

    fn default_sink(&self) -> Box<dyn ProgressSink> {
        if self.config.report_progress {
            Box::new(TracingProgress)
        } else {
            Box::new(NoProgress)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, u64)]) -> FrequencyTable {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_exact_then_similar_pipeline() {
        let engine = ClusteringEngine::with_config(ClusterConfig::default().quiet());
        let mut t = table(&[
            ("ACGTACGTAC", 20),
            ("ACGTACGT", 5),
            ("ACGTACGAAC", 2),
            ("GGGGCCCC", 8),
        ]);
        let total = t.total();

        let exact = engine.collapse_exact(&mut t);
        assert_eq!(exact.mass_moved, 5);
        assert_eq!(t.get("ACGTACGTAC"), 25);

        let similar = engine.cluster_similar(&mut t);
        assert_eq!(t.total(), total);
        // ACGTACGAAC joins ACGTACGTAC, which then moves onto ACGTACGAAC
        assert_eq!(t.get("ACGTACGAAC"), 27);
        assert_eq!(t.get("ACGTACGTAC"), 0);
        assert_eq!(similar.merges, 2);
        assert_eq!(t.non_zero_len(), 2);
        assert_eq!(t.get("GGGGCCCC"), 8);
    }

    #[test]
    fn test_classify_uses_bins_index() {
        let engine = ClusteringEngine::with_config(ClusterConfig::default().quiet());
        let mut bins = BinTable::seeded(["ACGT", "TGCA"]);
        let mut sample = table(&[("ACGA", 4)]);
        let stats = engine.classify(&mut bins, &mut sample);
        assert_eq!(bins.get("ACGT"), 4);
        assert_eq!(stats.merges, 1);
        assert_eq!(stats.examined, 1);
    }

    #[test]
    fn test_explicit_window_lengths_are_used() {
        let config = ClusterConfig::default()
            .with_metric(crate::index::trie::DistanceMetric::Hamming)
            .with_window_lengths(vec![9])
            .quiet();
        let engine = ClusteringEngine::with_config(config);
        // Derived lengths would index the 5-window TACGT and merge TACGA
        let mut t = table(&[("GGTACGTCC", 5), ("TACGA", 3)]);
        engine.cluster_similar(&mut t);
        assert_eq!(t.get("GGTACGTCC"), 5);
        assert_eq!(t.get("TACGA"), 3);
    }
}
