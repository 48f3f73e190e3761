//! Core data types for sequence counting.
//!
//! - [`sequence`]: The nucleotide alphabet and length trimming
//! - [`table`]: [`FrequencyTable`], the sequence → count map every pass reads and
//!   rewrites, and [`BinTable`], the same map seeded with reference bins
//!
//! ## Invariants
//!
//! Every clustering pass only moves counts between keys, so a table's
//! [`FrequencyTable::total`] is the same before and after. Keys are never
//! removed; a sequence merged into another keeps a count of zero.

pub mod sequence;
pub mod table;

pub use table::{BinTable, FrequencyTable};
