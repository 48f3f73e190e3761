use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use thiserror::Error;

use crate::core::table::FrequencyTable;

#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("Sample '{0}' was added twice")]
    DuplicateSample(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Helper function to convert a count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Helper function to convert a length to f64 with explicit precision loss allowance
#[inline]
fn len_to_f64(len: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        len as f64
    }
}

/// Sequences × samples count matrix
#[derive(Debug, Clone, Default, Serialize)]
pub struct CountMatrix {
    samples: Vec<String>,
    rows: BTreeMap<String, Vec<f64>>,
    /// Per-sample divisors applied by [`CountMatrix::normalize`]
    #[serde(skip_serializing_if = "Option::is_none")]
    scale_factors: Option<Vec<f64>>,
}

impl CountMatrix {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Value for a sequence in a sample, if both exist
    #[must_use]
    pub fn get(&self, seq: &str, sample: &str) -> Option<f64> {
        let col = self.samples.iter().position(|s| s == sample)?;
        self.rows.get(seq).map(|values| values[col])
    }

    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.scale_factors.is_some()
    }

    /// Add a sample column. Every key of the table becomes a row, zero counts
    /// included; sequences absent from a sample read as zero.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::DuplicateSample` if the name is already present.
    pub fn insert_sample(&mut self, name: &str, table: &FrequencyTable) -> Result<(), MatrixError> {
        if self.samples.iter().any(|s| s == name) {
            return Err(MatrixError::DuplicateSample(name.to_string()));
        }

        let width = self.samples.len() + 1;
        self.samples.push(name.to_string());
        for values in self.rows.values_mut() {
            values.push(0.0);
        }
        for (seq, count) in table.iter() {
            let values = self
                .rows
                .entry(seq.to_string())
                .or_insert_with(|| vec![0.0; width]);
            values[width - 1] = count_to_f64(count);
        }
        Ok(())
    }

    /// Remove sequences that are zero in every sample
    pub fn drop_empty_rows(&mut self) {
        self.rows.retain(|_, values| values.iter().any(|&v| v != 0.0));
    }

    /// Divide each sample by its median-of-log-ratios scale factor.
    ///
    /// For every row the log counts are centred on the row's mean log count;
    /// a sample's factor is `exp` of the median of its centred values. Rows
    /// with a zero anywhere have no finite centred values and are ignored. A
    /// sample with no usable rows keeps a factor of 1.
    ///
    /// Returns the factors, in sample order.
    pub fn normalize(&mut self) -> Vec<f64> {
        let mut centred: Vec<Vec<f64>> = vec![Vec::new(); self.samples.len()];

        for values in self.rows.values() {
            let logs: Vec<f64> = values.iter().map(|v| v.ln()).collect();
            let mean = logs.iter().sum::<f64>() / len_to_f64(logs.len());
            for (col, log) in logs.iter().enumerate() {
                let ratio = log - mean;
                if ratio.is_finite() {
                    centred[col].push(ratio);
                }
            }
        }

        let factors: Vec<f64> = centred
            .into_iter()
            .map(|mut ratios| median(&mut ratios).map_or(1.0, f64::exp))
            .collect();

        for values in self.rows.values_mut() {
            for (value, factor) in values.iter_mut().zip(&factors) {
                *value /= factor;
            }
        }

        self.scale_factors = Some(factors.clone());
        factors
    }

    /// Write the matrix as TSV: a `sequence` column followed by one column per
    /// sample, rows sorted by sequence. Raw counts print as integers,
    /// normalized values with four decimals.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::Io` if writing fails.
    pub fn write_tsv<W: Write>(&self, mut out: W) -> Result<(), MatrixError> {
        write!(out, "sequence")?;
        for sample in &self.samples {
            write!(out, "\t{sample}")?;
        }
        writeln!(out)?;

        for (seq, values) in &self.rows {
            write!(out, "{seq}")?;
            for value in values {
                write!(out, "\t{}", self.format_value(*value))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Write an aligned, human-readable table
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::Io` if writing fails.
    pub fn write_text<W: Write>(&self, mut out: W) -> Result<(), MatrixError> {
        let seq_width = self
            .rows
            .keys()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max("Sequence".len());
        let col_widths: Vec<usize> = self
            .samples
            .iter()
            .enumerate()
            .map(|(col, name)| {
                self.rows
                    .values()
                    .map(|values| self.format_value(values[col]).len())
                    .max()
                    .unwrap_or(0)
                    .max(name.len())
            })
            .collect();

        write!(out, "{:<seq_width$}", "Sequence")?;
        for (name, width) in self.samples.iter().zip(&col_widths) {
            write!(out, "  {name:>width$}")?;
        }
        writeln!(out)?;
        let total_width = seq_width + col_widths.iter().map(|w| w + 2).sum::<usize>();
        writeln!(out, "{}", "=".repeat(total_width))?;

        for (seq, values) in &self.rows {
            write!(out, "{seq:<seq_width$}")?;
            for (value, width) in values.iter().zip(&col_widths) {
                write!(out, "  {:>width$}", self.format_value(*value))?;
            }
            writeln!(out)?;
        }

        if let Some(factors) = &self.scale_factors {
            writeln!(out)?;
            for (name, factor) in self.samples.iter().zip(factors) {
                writeln!(out, "Scale factor {name}: {factor:.4}")?;
            }
        }
        Ok(())
    }

    /// Serialize as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, MatrixError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn format_value(&self, value: f64) -> String {
        if self.is_normalized() {
            format!("{value:.4}")
        } else {
            format!("{value:.0}")
        }
    }
}

/// Median of the values, averaging the middle pair for even lengths
fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}
