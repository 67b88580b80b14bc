//! Population genetics diversity statistics
//!
//! This module provides:
//! - Allele counting over variant and sample subsets
//! - Diversity metrics (π, θ_W, Tajima's D)
//! - Heterozygosity metrics (Ho, He, F)
//! - Contig and clade partitioning, and the engine that drives them
//! - Genome-wide weighted aggregation

pub mod config;
pub mod counts;
pub mod diversity;
pub mod engine;
pub mod genome_wide;
pub mod heterozygosity;
pub mod partition;
pub mod result;
pub mod utils;

// Re-export commonly used items
pub use config::{AnalysisConfig, Statistic};
pub use counts::{count_alleles, count_alleles_masked, AlleleCounts};
pub use diversity::{
    between_pairwise_differences, mean_pairwise_difference, sequence_diversity, tajima_d,
    watterson_theta,
};
pub use engine::{DiversityEngine, DiversityReport, UnitError, UnitFailure};
pub use genome_wide::{aggregate, weighted_mean, UnweightedPolicy};
pub use heterozygosity::{
    expected_heterozygosity, heterozygosity_profile, inbreeding_coefficient,
    observed_heterozygosity, VariantHeterozygosity,
};
pub use partition::Partitioner;
pub use result::{ContigValues, StatValue, StatisticResult};
