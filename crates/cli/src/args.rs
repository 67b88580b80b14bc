use clap::Args;
use std::path::PathBuf;
use sumstats_analysis::analysis::{AnalysisConfig, Statistic, UnweightedPolicy};

#[derive(Args, Debug)]
pub struct ComputeArgs {
    /// Callset JSON file
    #[arg(short, long)]
    pub callset: PathBuf,

    /// Clade JSON file mapping clade labels to sample identifiers
    #[arg(long)]
    pub clades: Option<PathBuf>,

    /// Contig weight JSON file (e.g. chromosome lengths)
    ///
    /// When given, every contig-resolved entry gains a "genome-wide" value.
    #[arg(short, long)]
    pub weights: Option<PathBuf>,

    /// Engine configuration JSON file
    ///
    /// Missing fields take their defaults. Flags below override the file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Statistic to compute (repeatable; all statistics if omitted)
    ///
    /// One of: pi, theta_w, tajima_d, observed_het, expected_het, inbreeding
    #[arg(short, long = "stat")]
    pub stats: Vec<Statistic>,

    /// Add one entry per sample
    #[arg(long)]
    pub per_sample: bool,

    /// Report the population as one pooled value instead of per contig
    #[arg(long)]
    pub pooled: bool,

    /// Ploidy term of the Hardy-Weinberg expectation
    #[arg(long)]
    pub ploidy: Option<usize>,

    /// Fewest segregating sites for which Tajima's D is reported
    #[arg(long)]
    pub min_segregating_sites: Option<usize>,

    /// Genome-wide value when no contig of an entry has a weight (zero, nan)
    #[arg(long)]
    pub unweighted: Option<UnweightedPolicy>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ComputeArgs {
    /// Apply command-line overrides on top of a base configuration.
    pub fn apply(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if self.per_sample {
            config.per_sample = true;
        }
        if self.pooled {
            config.resolve_contigs = false;
        }
        if let Some(ploidy) = self.ploidy {
            config.ploidy = ploidy;
        }
        if let Some(min) = self.min_segregating_sites {
            config.min_segregating_sites = min;
        }
        if let Some(policy) = self.unweighted {
            config.unweighted_policy = policy;
        }
        config
    }

    /// Requested statistics, or every statistic when none was named.
    pub fn statistics(&self) -> Vec<Statistic> {
        if self.stats.is_empty() {
            Statistic::ALL.to_vec()
        } else {
            self.stats.clone()
        }
    }
}

#[derive(Args, Debug)]
pub struct HetProfileArgs {
    /// Callset JSON file
    #[arg(short, long)]
    pub callset: PathBuf,

    /// Comma-separated sample identifiers (all samples if omitted)
    #[arg(long, value_delimiter = ',')]
    pub samples: Vec<String>,

    /// Ploidy term of the Hardy-Weinberg expectation
    #[arg(long, default_value = "2")]
    pub ploidy: usize,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
