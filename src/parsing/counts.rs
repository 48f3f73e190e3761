use std::path::Path;
use tracing::warn;

use crate::core::table::FrequencyTable;
use crate::parsing::ParseError;
use crate::utils::validation::{check_sequence_limit, normalize_sequence};

/// Parse a count table file with columns: sequence, count
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_counts_file(path: &Path, cutoff: u64) -> Result<FrequencyTable, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_counts_text(&content, cutoff)
}

/// Parse count table text with columns: sequence, count
///
/// Fields are separated by tabs or other whitespace. Blank lines and `#`
/// comments are skipped, as is a header whose first field is `seq` or
/// `sequence`. Rows with a count below `cutoff` are dropped. A sequence
/// listed twice keeps its last count.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line has fewer than 2 fields,
/// `ParseError::MalformedInput` for invalid sequences or counts, or
/// `ParseError::TooManySequences` if the limit is exceeded.
pub fn parse_counts_text(text: &str, cutoff: u64) -> Result<FrequencyTable, ParseError> {
    let mut table = FrequencyTable::new();
    for row in rows(text) {
        let (seq, count) = row?;
        if count < cutoff {
            continue;
        }
        if !table.contains(&seq) && check_sequence_limit(table.len()).is_some() {
            return Err(ParseError::TooManySequences(table.len()));
        }
        if let Some(previous) = table.insert(seq.clone(), count) {
            warn!("Sequence {seq} listed more than once (count {previous} replaced by {count})");
        }
    }
    Ok(table)
}

/// Merge several count tables by presence.
///
/// Each table contributes 1 to every sequence it lists with a count at or
/// above `cutoff`, so the result counts in how many inputs a sequence passed.
///
/// # Errors
///
/// Returns the first error raised while reading or parsing any file.
pub fn parse_presence_files(paths: &[impl AsRef<Path>], cutoff: u64) -> Result<FrequencyTable, ParseError> {
    let mut merged = FrequencyTable::new();
    for path in paths {
        let content = std::fs::read_to_string(path.as_ref())?;
        merge_presence(&mut merged, &content, cutoff)?;
    }
    Ok(merged)
}

/// Add one presence vote per qualifying row of `text` to `merged`.
///
/// # Errors
///
/// Same conditions as [`parse_counts_text`].
pub fn merge_presence(merged: &mut FrequencyTable, text: &str, cutoff: u64) -> Result<(), ParseError> {
    for row in rows(text) {
        let (seq, count) = row?;
        if count < cutoff {
            continue;
        }
        if !merged.contains(&seq) && check_sequence_limit(merged.len()).is_some() {
            return Err(ParseError::TooManySequences(merged.len()));
        }
        merged.increment(&seq);
    }
    Ok(())
}

fn rows(text: &str) -> impl Iterator<Item = Result<(String, u64), ParseError>> + '_ {
    let mut first_data_line = true;

    text.lines().enumerate().filter_map(move |(i, line)| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();

        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.to_lowercase()).unwrap_or_default();
            if first == "seq" || first == "sequence" {
                return None;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        Some(parse_row(&fields, i + 1))
    })
}

fn parse_row(fields: &[&str], line_num: usize) -> Result<(String, u64), ParseError> {
    if fields.len() < 2 {
        return Err(ParseError::InvalidFormat(format!(
            "Line {line_num} has fewer than 2 fields"
        )));
    }

    let seq = normalize_sequence(fields[0]).ok_or_else(|| {
        ParseError::MalformedInput(format!(
            "Invalid sequence on line {line_num}: '{}'",
            fields[0]
        ))
    })?;

    let count: u64 = fields[1].parse().map_err(|_| {
        ParseError::MalformedInput(format!(
            "Invalid count on line {line_num}: '{}'",
            fields[1]
        ))
    })?;

    Ok((seq, count))
}
