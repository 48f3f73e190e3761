use std::path::Path;

use crate::core::table::BinTable;
use crate::parsing::ParseError;
use crate::utils::validation::{check_sequence_limit, normalize_sequence};

/// Parse a bin list file: one reference sequence per line
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_bins_file(path: &Path) -> Result<BinTable, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_bins_text(&content)
}

/// Parse bin list text. Blank lines and `#` comments are skipped; every bin
/// starts with a count of zero.
///
/// # Errors
///
/// Returns `ParseError::MalformedInput` for invalid sequences, or
/// `ParseError::TooManySequences` if the limit is exceeded.
pub fn parse_bins_text(text: &str) -> Result<BinTable, ParseError> {
    let mut sequences = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let seq = normalize_sequence(line).ok_or_else(|| {
            ParseError::MalformedInput(format!("Invalid bin sequence on line {}: '{line}'", i + 1))
        })?;

        if check_sequence_limit(sequences.len()).is_some() {
            return Err(ParseError::TooManySequences(sequences.len()));
        }
        sequences.push(seq);
    }

    Ok(BinTable::seeded(sequences))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bins_text() {
        let bins = parse_bins_text("ACGT\n\ntgca\n# comment\nACGT\n").unwrap();
        assert_eq!(bins.len(), 2);
        assert!(bins.contains("TGCA"));
        assert_eq!(bins.total(), 0);
    }

    #[test]
    fn test_invalid_bin() {
        let err = parse_bins_text("ACGT\nAC GT\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedInput(_)));
        assert!(err.to_string().contains("line 2"));
    }
}
