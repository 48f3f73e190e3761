//! Output of clustered tables.
//!
//! A [`CountMatrix`] collects one frequency table per sample into a
//! sequences × samples matrix that can be normalized for sequencing depth and
//! written as TSV, aligned text, or JSON.
//!
//! ## Example
//!
//! ```rust
//! use iqseq::core::table::FrequencyTable;
//! use iqseq::report::CountMatrix;
//!
//! let sample: FrequencyTable = [("ACGT", 4), ("TTTT", 0)].into_iter().collect();
//! let mut matrix = CountMatrix::new();
//! matrix.insert_sample("s1", &sample).unwrap();
//! matrix.drop_empty_rows();
//!
//! let mut out = Vec::new();
//! matrix.write_tsv(&mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "sequence\ts1\nACGT\t4\n");
//! ```

pub mod matrix;

pub use matrix::{CountMatrix, MatrixError};
