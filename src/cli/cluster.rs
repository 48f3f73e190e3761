use std::path::PathBuf;

use clap::Args;

use crate::cli::{print_matrix, MatchArgs, OutputFormat};
use crate::clustering::{ClusteringEngine, MergeStats};
use crate::core::table::FrequencyTable;
use crate::parsing::counts::{parse_counts_file, parse_presence_files};
use crate::parsing::sample_name;
use crate::report::CountMatrix;

/// Which passes to run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ClusterMode {
    /// Fold exact substrings into longer sequences
    Exact,
    /// Merge sequences within the mismatch budget
    Similar,
    /// Exact substring collapse, then approximate clustering
    #[default]
    Both,
}

#[derive(Args)]
pub struct ClusterArgs {
    /// Count tables (`sequence<TAB>count`). Several tables are merged by
    /// presence: each contributes 1 per sequence passing the cutoff.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Passes to run
    #[arg(long, value_enum, default_value_t = ClusterMode::Both)]
    pub mode: ClusterMode,

    /// Ignore rows with a count below this
    #[arg(long, default_value_t = 1)]
    pub cutoff: u64,

    #[command(flatten)]
    pub matching: MatchArgs,
}

pub fn run(args: ClusterArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let engine = ClusteringEngine::with_config(args.matching.to_config()?);

    let (name, mut table) = load_table(&args.inputs, args.cutoff)?;
    let before = table.total();

    if verbose {
        eprintln!(
            "Loaded {} distinct sequences ({} total) from {} file(s)",
            table.len(),
            before,
            args.inputs.len()
        );
    }

    if matches!(args.mode, ClusterMode::Exact | ClusterMode::Both) {
        let stats = engine.collapse_exact(&mut table);
        report("Exact substring collapse", &stats, verbose);
    }
    if matches!(args.mode, ClusterMode::Similar | ClusterMode::Both) {
        let stats = engine.cluster_similar(&mut table);
        report("Approximate clustering", &stats, verbose);
    }

    debug_assert_eq!(before, table.total(), "clustering must conserve counts");

    if verbose {
        eprintln!(
            "{} sequences remain of {} ({} total)",
            table.non_zero_len(),
            table.len(),
            table.total()
        );
    }

    let mut matrix = CountMatrix::new();
    matrix.insert_sample(&name, &table)?;
    matrix.drop_empty_rows();
    print_matrix(&matrix, format)
}

fn load_table(inputs: &[PathBuf], cutoff: u64) -> anyhow::Result<(String, FrequencyTable)> {
    match inputs {
        [single] => Ok((sample_name(single), parse_counts_file(single, cutoff)?)),
        _ => Ok(("presence".to_string(), parse_presence_files(inputs, cutoff)?)),
    }
}

fn report(stage: &str, stats: &MergeStats, verbose: bool) {
    if verbose {
        eprintln!(
            "{stage}: examined {}, merged {}, moved {}",
            stats.examined, stats.merges, stats.mass_moved
        );
    }
}
