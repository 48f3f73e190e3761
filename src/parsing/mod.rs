//! Readers that turn input files into frequency tables.
//!
//! This module provides parsers for:
//!
//! - **FASTQ files**: Count identical reads, optionally gzip compressed
//! - **Count tables**: Two-column `sequence<TAB>count` text tables
//! - **Bin lists**: One reference sequence per line
//!
//! Every parser validates sequences against the nucleotide alphabet; bad
//! counts or symbols in tables are rejected as [`ParseError::MalformedInput`].
//!
//! ## Example
//!
//! ```rust
//! use iqseq::parsing::counts::parse_counts_text;
//!
//! let table = parse_counts_text("ACGT\t12\nTTTT\t3\n", 1).unwrap();
//! assert_eq!(table.get("ACGT"), 12);
//! assert_eq!(table.total(), 15);
//! ```

use thiserror::Error;

pub mod bins;
pub mod counts;
pub mod fastq;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Too many sequences: {0} exceeds maximum allowed (10000000)")]
    TooManySequences(usize),
}

/// Sample name for an input path: the file name up to its first `.`
#[must_use]
pub fn sample_name(path: &std::path::Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .filter(|stem| !stem.is_empty())
        .map_or_else(|| path.display().to_string(), str::to_string)
}
