//! Sumstats: population-genetics diversity statistics from genotype callsets.
//!
//! This library computes nucleotide diversity (π), Watterson's θ, Tajima's D,
//! observed and expected heterozygosity and the inbreeding coefficient over a
//! diploid genotype tensor, partitioned by contig, sample and clade, with
//! optional genome-wide means weighted by contig length.
//!
//! The work is split across two crates re-exported here:
//! - [`sumstats_core`]: the validated [`Callset`], its JSON document form, clade and
//!   weight maps, and the error types
//! - [`sumstats_analysis`]: allele counting, the statistic formulas and the
//!   [`DiversityEngine`]

pub mod prelude;

pub use sumstats_analysis::{self, analysis};
pub use sumstats_core;

// Re-export commonly used types for convenient external access.
pub use sumstats_analysis::analysis::{
    aggregate, AnalysisConfig, DiversityEngine, DiversityReport, StatValue, Statistic,
    StatisticResult, UnweightedPolicy,
};
pub use sumstats_core::{Callset, CallsetDocument, CladeMap, ContigWeights};
