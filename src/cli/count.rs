use std::path::PathBuf;

use clap::Args;

use crate::cli::{print_matrix, OutputFormat};
use crate::parsing::fastq::{count_fastq_file, CountOptions, DEFAULT_TRIM_BASE};
use crate::parsing::sample_name;
use crate::report::CountMatrix;

#[derive(Args)]
pub struct CountArgs {
    /// FASTQ file, optionally gzip compressed
    #[arg(required = true)]
    pub input: PathBuf,

    /// Truncate reads to a multiple of this length (0 disables)
    #[arg(long, default_value_t = DEFAULT_TRIM_BASE)]
    pub trim_base: usize,

    /// Drop reads shorter than this after trimming
    #[arg(long, default_value_t = 0)]
    pub min_length: usize,
}

pub fn run(args: CountArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let options = CountOptions {
        trim_base: args.trim_base,
        min_length: args.min_length,
    };
    let (table, summary) = count_fastq_file(&args.input, &options)?;

    if verbose {
        eprintln!(
            "Read {} records: {} counted into {} distinct sequences, {} too short, {} invalid",
            summary.records,
            summary.counted,
            table.len(),
            summary.too_short,
            summary.invalid
        );
    }

    let mut matrix = CountMatrix::new();
    matrix.insert_sample(&sample_name(&args.input), &table)?;
    print_matrix(&matrix, format)
}
