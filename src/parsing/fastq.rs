//! FASTQ reader that counts identical reads.
//!
//! Supports both uncompressed and gzip/bgzip compressed files; compression is
//! detected from a `.gz` or `.bgz` suffix.

use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fastq;
use tracing::{debug, warn};

use crate::core::sequence::trim_to_multiple;
use crate::core::table::FrequencyTable;
use crate::parsing::ParseError;
use crate::utils::validation::{check_sequence_limit, normalize_sequence};

/// Default length multiple reads are truncated to
pub const DEFAULT_TRIM_BASE: usize = 4;

/// How reads are turned into table keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountOptions {
    /// Truncate each read to a multiple of this length (0 or 1 disables)
    pub trim_base: usize,
    /// Drop reads shorter than this after trimming
    pub min_length: usize,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            trim_base: DEFAULT_TRIM_BASE,
            min_length: 0,
        }
    }
}

/// Reads seen while counting a FASTQ file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountSummary {
    pub records: usize,
    pub counted: usize,
    pub too_short: usize,
    pub invalid: usize,
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Count identical reads in a FASTQ file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles`
/// if a record cannot be parsed, `ParseError::InvalidFormat` if a record's
/// sequence and quality lengths differ, or `ParseError::TooManySequences` if
/// the limit is exceeded.
pub fn count_fastq_file(
    path: &Path,
    options: &CountOptions,
) -> Result<(FrequencyTable, CountSummary), ParseError> {
    let file = std::fs::File::open(path)?;
    if is_gzipped(path) {
        count_fastq_reader(BufReader::new(MultiGzDecoder::new(file)), options)
    } else {
        count_fastq_reader(BufReader::new(file), options)
    }
}

/// Count identical reads from any buffered FASTQ source.
///
/// Reads are uppercased, checked against the nucleotide alphabet, trimmed to
/// `options.trim_base` and dropped when shorter than `options.min_length`.
/// Reads with other symbols are skipped with a warning.
///
/// # Errors
///
/// Same conditions as [`count_fastq_file`], minus file opening.
pub fn count_fastq_reader<R: BufRead>(
    inner: R,
    options: &CountOptions,
) -> Result<(FrequencyTable, CountSummary), ParseError> {
    let mut reader = fastq::io::Reader::new(inner);
    let mut table = FrequencyTable::new();
    let mut summary = CountSummary::default();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTQ record: {e}")))?;
        summary.records += 1;

        let sequence = record.sequence();
        if sequence.len() != record.quality_scores().len() {
            return Err(ParseError::InvalidFormat(format!(
                "Record {} has {} bases but {} quality scores",
                summary.records,
                sequence.len(),
                record.quality_scores().len()
            )));
        }

        let Some(seq) = std::str::from_utf8(sequence).ok().and_then(normalize_sequence) else {
            summary.invalid += 1;
            continue;
        };

        let trimmed = trim_to_multiple(&seq, options.trim_base);
        if trimmed.is_empty() || trimmed.len() < options.min_length {
            summary.too_short += 1;
            continue;
        }

        if !table.contains(trimmed) && check_sequence_limit(table.len()).is_some() {
            return Err(ParseError::TooManySequences(table.len()));
        }
        table.increment(trimmed);
        summary.counted += 1;
    }

    if summary.invalid > 0 {
        warn!(
            "Skipped {} of {} reads containing symbols other than ACGTN",
            summary.invalid, summary.records
        );
    }
    debug!(
        records = summary.records,
        counted = summary.counted,
        too_short = summary.too_short,
        distinct = table.len(),
        "Counted FASTQ reads"
    );

    Ok((table, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FASTQ: &str = "@r1\nACGTACGTA\n+\nIIIIIIIII\n\
@r2\nacgtacgt\n+\nIIIIIIII\n\
@r3\nACG\n+\nIII\n\
@r4\nACGTUCGT\n+\nIIIIIIII\n\
@r5\nTTTTGGGG\n+\nIIIIIIII\n";

    #[test]
    fn test_count_fastq_reader() {
        let (table, summary) = count_fastq_reader(FASTQ.as_bytes(), &CountOptions::default()).unwrap();
        // r1 is trimmed to 8 and joins r2
        assert_eq!(table.get("ACGTACGT"), 2);
        assert_eq!(table.get("TTTTGGGG"), 1);
        assert_eq!(table.len(), 2);
        assert_eq!(summary.records, 5);
        assert_eq!(summary.counted, 3);
        assert_eq!(summary.too_short, 1);
        assert_eq!(summary.invalid, 1);
    }

    #[test]
    fn test_min_length_and_no_trim() {
        let options = CountOptions {
            trim_base: 0,
            min_length: 9,
        };
        let (table, _) = count_fastq_reader(FASTQ.as_bytes(), &options).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("ACGTACGTA"), 1);
    }

    #[test]
    fn test_quality_length_mismatch_is_rejected() {
        let err = count_fastq_reader(&b"@r\nACGT\n+\nII\n"[..], &CountOptions::default()).unwrap_err();
        // noodles may reject the record before the length check does
        assert!(
            matches!(err, ParseError::InvalidFormat(_) | ParseError::Noodles(_)),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_empty_input() {
        let (table, summary) = count_fastq_reader(&b""[..], &CountOptions::default()).unwrap();
        assert!(table.is_empty());
        assert_eq!(summary, CountSummary::default());
    }

    #[test]
    fn test_gzipped_file() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reads.fastq.gz");
        let mut encoder = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
        encoder.write_all(FASTQ.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let (table, _) = count_fastq_file(&path, &CountOptions::default()).unwrap();
        assert_eq!(table.get("ACGTACGT"), 2);
    }

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("a.fastq.gz")));
        assert!(is_gzipped(Path::new("a.FQ.BGZ")));
        assert!(!is_gzipped(Path::new("a.fastq")));
    }
}
