//! Prefix-trie indexes over frequency tables.
//!
//! - [`trie::Trie`]: byte-keyed arena trie with insert-if-absent, substring
//!   scanning and bounded-distance lookup
//! - [`builder`]: single-resolution (full sequences) and multi-resolution
//!   (full sequences plus every window of every registered length) builders
//!
//! ## Entries
//!
//! Every key of a multi-resolution index is either [`TrieEntry::Canonical`]
//! (a full sequence of the table) or [`TrieEntry::SubsequenceOf`] (a window
//! pointing back at the longer sequence it was cut from). Keys are written
//! once; the first writer wins.
//!
//! ## Example
//!
//! ```rust
//! use iqseq::core::table::FrequencyTable;
//! use iqseq::index::{build_multi_resolution, TrieEntry};
//!
//! let table: FrequencyTable = [("AAAA", 3), ("AAAAGG", 2)].into_iter().collect();
//! let index = build_multi_resolution(&table, None);
//!
//! assert_eq!(index.get(b"AAAA"), Some(&TrieEntry::Canonical(3)));
//! assert!(matches!(index.get(b"AAGG"), Some(TrieEntry::SubsequenceOf(_))));
//! ```

pub mod builder;
pub mod trie;

pub use builder::{
    build_multi_resolution, build_single_resolution, window_lengths, SequenceIndex, TrieEntry,
};
pub use trie::{ApproximateHit, DistanceMetric, SubstringHit, Trie};
