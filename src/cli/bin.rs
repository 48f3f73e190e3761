use std::path::PathBuf;

use clap::Args;

use crate::cli::{print_matrix, MatchArgs, OutputFormat};
use crate::clustering::ClusteringEngine;
use crate::parsing::bins::parse_bins_file;
use crate::parsing::counts::parse_counts_file;
use crate::parsing::sample_name;
use crate::report::CountMatrix;

#[derive(Args)]
pub struct BinArgs {
    /// Bin list, one reference sequence per line
    #[arg(required = true)]
    pub bins: PathBuf,

    /// Sample count tables (`sequence<TAB>count`), one column each
    #[arg(required = true)]
    pub samples: Vec<PathBuf>,

    /// Ignore sample rows with a count below this
    #[arg(long, default_value_t = 1)]
    pub cutoff: u64,

    /// Scale samples by median-of-log-ratios size factors
    #[arg(long)]
    pub normalize: bool,

    #[command(flatten)]
    pub matching: MatchArgs,
}

pub fn run(args: BinArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let engine = ClusteringEngine::with_config(args.matching.to_config()?);
    let empty_bins = parse_bins_file(&args.bins)?;
    if empty_bins.is_empty() {
        anyhow::bail!("No bins found in {}", args.bins.display());
    }

    if verbose {
        eprintln!("Loaded {} bins from {}", empty_bins.len(), args.bins.display());
    }

    let mut matrix = CountMatrix::new();
    for path in &args.samples {
        let name = sample_name(path);
        let mut sample = parse_counts_file(path, args.cutoff)?;
        let total = sample.total();
        let mut bins = empty_bins.clone();

        let stats = engine.classify(&mut bins, &mut sample);

        if verbose {
            eprintln!(
                "{name}: {} of {} sequences binned, {} of {total} reads assigned",
                stats.merges, stats.examined, stats.mass_moved
            );
        }
        matrix.insert_sample(&name, &bins)?;
    }

    if args.normalize {
        let factors = matrix.normalize();
        if verbose {
            for (name, factor) in matrix.samples().iter().zip(&factors) {
                eprintln!("Scale factor {name}: {factor:.4}");
            }
        }
    }

    print_matrix(&matrix, format)
}
