//! Sequence clustering over a frequency table.
//!
//! Three passes share one trie-index mechanism:
//!
//! - [`exact::collapse_exact_substrings`]: folds sequences that occur verbatim
//!   inside a longer sequence into it
//! - [`similar::cluster_similar`]: folds each sequence into the first near
//!   neighbour (or near-containing sequence) within the mismatch budget
//! - [`bins::classify_into_bins`]: routes each sample sequence's count into the
//!   first matching reference bin
//!
//! [`ClusteringEngine`] builds the right index for each pass and discards it
//! afterwards.
//!
//! ## Invariants
//!
//! - Counts are only moved, never created or lost: the table total (or the
//!   sample plus bins total) is the same before and after every pass.
//! - Merged-away sequences stay in the table with a count of zero.
//! - Processing is longest first, ties lexicographic; the first accepted hit
//!   wins, ranked by distance, then key length, then key.
//!
//! ## Example
//!
//! ```rust
//! use iqseq::clustering::{ClusterConfig, ClusteringEngine};
//! use iqseq::core::table::FrequencyTable;
//!
//! let mut table: FrequencyTable =
//!     [("AAAA", 3), ("AAAAGG", 2), ("TTTT", 5)].into_iter().collect();
//!
//! let engine = ClusteringEngine::with_config(ClusterConfig::default().quiet());
//! engine.collapse_exact(&mut table);
//!
//! assert_eq!(table.get("AAAAGG"), 5);
//! assert_eq!(table.get("AAAA"), 0);
//! assert_eq!(table.total(), 10);
//! ```

use serde::Serialize;

pub mod bins;
pub mod config;
pub mod engine;
pub mod exact;
pub mod matches;
pub mod progress;
pub mod similar;

pub use config::{ClusterConfig, ConfigError};
pub use engine::ClusteringEngine;
pub use progress::{NoProgress, ProgressSink, TracingProgress};

/// What one clustering pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    /// Sequences that were looked up
    pub examined: usize,
    /// Merges that moved a non-zero count
    pub merges: usize,
    /// Total count moved between keys
    pub mass_moved: u64,
}

impl MergeStats {
    fn record(&mut self, moved: u64) {
        if moved > 0 {
            self.merges += 1;
            self.mass_moved += moved;
        }
    }
}
