mod args;
mod commands;
mod logging;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use args::{ComputeArgs, HetProfileArgs};
use commands::{compute, het_profile, inspect};

/// Sumstats: Diversity Statistics for Genotype Callsets
///
/// Computes nucleotide diversity, Watterson's theta, Tajima's D,
/// heterozygosity and inbreeding per contig, per sample and per clade,
/// with optional genome-wide weighted means.
#[derive(Parser, Debug)]
#[command(name = "sumstats")]
#[command(author, version, about = "Population genetic summary statistics", long_about = None)]
struct Cli {
    /// Number of threads to use for parallel processing
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute diversity statistics.
    ///
    /// Writes one JSON document keyed by statistic name. Results go to stdout
    /// unless an output file is given.
    Compute(Box<ComputeArgs>),

    /// Per-variant heterozygosity (Ho, He, F) for a sample subset.
    HetProfile(HetProfileArgs),

    /// Show a summary of a callset: samples, variants and contigs.
    Inspect {
        /// Callset JSON file
        #[arg(short, long)]
        callset: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    match cli.command {
        Commands::Compute(args) => {
            compute::compute_statistics(&args)?;
        }
        Commands::HetProfile(args) => {
            het_profile::write_profile(&args)?;
        }
        Commands::Inspect { callset } => {
            inspect::show_summary(&callset)?;
        }
    }

    Ok(())
}
