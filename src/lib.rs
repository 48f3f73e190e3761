//! # iqseq
//!
//! A library for counting short sequencing reads and merging related sequences.
//!
//! Amplicon and barcode experiments produce many reads that differ from the
//! molecule they came from by a truncation or a single sequencing error.
//! `iqseq` turns reads into a frequency table and folds that noise back onto
//! the sequences it most likely came from.
//!
//! ## Features
//!
//! - **Exact counting**: Identical reads from FASTQ, trimmed to a length multiple
//! - **Substring collapse**: Sequences contained in a longer one join it
//! - **Approximate clustering**: Sequences within a small edit distance of
//!   another sequence, or of a window of a longer one, are merged into it
//! - **Binning**: Sample sequences are assigned to the closest reference bin
//! - **Normalization**: Median-of-log-ratios scaling across samples
//!
//! Every pass conserves the table's total count.
//!
//! ## Example
//!
//! ```rust
//! use iqseq::{ClusteringEngine, FrequencyTable};
//!
//! let mut table: FrequencyTable =
//!     [("ACGTACGT", 10), ("ACGTTCGT", 2), ("CGTA", 1)].into_iter().collect();
//!
//! let engine = ClusteringEngine::new();
//! engine.collapse_exact(&mut table);
//! engine.cluster_similar(&mut table);
//!
//! assert_eq!(table.get("ACGTACGT"), 13);
//! assert_eq!(table.total(), 13);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Frequency tables and sequence helpers
//! - [`index`]: Prefix trie with exact, substring and approximate lookup
//! - [`clustering`]: Substring collapse, approximate clustering and binning
//! - [`parsing`]: Readers for FASTQ, count tables and bin lists
//! - [`report`]: Multi-sample count matrices
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod clustering;
pub mod core;
pub mod index;
pub mod parsing;
pub mod report;
pub mod utils;

// Re-export commonly used types for convenience
pub use clustering::{ClusterConfig, ClusteringEngine, MergeStats};
pub use core::table::{BinTable, FrequencyTable};
pub use index::{DistanceMetric, SequenceIndex, TrieEntry};
pub use report::CountMatrix;
