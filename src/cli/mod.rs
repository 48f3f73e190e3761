//! Command-line interface for iqseq.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **count**: Count identical reads in a FASTQ file
//! - **cluster**: Collapse substrings and near-duplicates in count tables
//! - **bin**: Classify sample sequences against a list of reference bins
//!
//! ## Usage
//!
//! ```text
//! # Count reads, trimmed to a multiple of 4
//! iqseq count sample.fastq.gz > sample.counts.tsv
//!
//! # Collapse exact substrings, then cluster within one edit
//! iqseq cluster sample.counts.tsv --mode both -n 1
//!
//! # Presence table over several samples, Hamming distance only
//! iqseq cluster a.tsv b.tsv c.tsv --metric hamming --cutoff 5
//!
//! # Normalized bins × samples matrix
//! iqseq bin bins.txt a.tsv b.tsv --normalize --format tsv
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::clustering::ClusterConfig;
use crate::index::DistanceMetric;
use crate::report::CountMatrix;

pub mod bin;
pub mod cluster;
pub mod count;

#[derive(Parser)]
#[command(name = "iqseq")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Count, collapse and bin short sequencing reads")]
#[command(
    long_about = "iqseq turns short reads into frequency tables and merges related sequences.\n\nIt provides:\n- Exact read counting from FASTQ\n- Collapsing of sequences that are exact substrings of longer ones\n- Approximate clustering within a small edit distance\n- Classification of samples against a fixed list of bins"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count identical reads in a FASTQ file
    Count(count::CountArgs),

    /// Collapse and cluster sequences in count tables
    Cluster(cluster::ClusterArgs),

    /// Classify samples against reference bins
    Bin(bin::BinArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Write a matrix to stdout in the requested format
fn print_matrix(matrix: &CountMatrix, format: OutputFormat) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => matrix.write_text(&mut out)?,
        OutputFormat::Json => {
            use std::io::Write;
            writeln!(out, "{}", matrix.to_json()?)?;
        }
        OutputFormat::Tsv => matrix.write_tsv(&mut out)?,
    }
    Ok(())
}

/// Matching options shared by `cluster` and `bin`
#[derive(clap::Args, Debug, Default)]
pub struct MatchArgs {
    /// Maximum edit distance for an approximate match
    #[arg(short = 'n', long)]
    pub mismatches: Option<usize>,

    /// Distance metric for approximate matching
    #[arg(long, value_enum)]
    pub metric: Option<DistanceMetric>,

    /// Window lengths to index, comma-separated (default: all sequence lengths)
    #[arg(long, value_delimiter = ',')]
    pub lengths: Option<Vec<usize>>,

    /// JSON file with clustering options; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl MatchArgs {
    /// Build the clustering config from the optional file plus flag overrides
    pub fn to_config(&self) -> anyhow::Result<ClusterConfig> {
        let mut config = match &self.config {
            Some(path) => ClusterConfig::load_from_file(path)?,
            None => ClusterConfig::default(),
        };
        if let Some(mismatches) = self.mismatches {
            config = config.with_mismatches(mismatches);
        }
        if let Some(metric) = self.metric {
            config = config.with_metric(metric);
        }
        if let Some(lengths) = &self.lengths {
            config = config.with_window_lengths(lengths.clone());
        }
        config.validate()?;
        Ok(config)
    }
}
