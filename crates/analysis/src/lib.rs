//! # Analysis Crate
//!
//! Diversity statistics over genotype callsets: allele counting, π, θ_W,
//! Tajima's D, heterozygosity and inbreeding, computed per contig, per sample
//! and per clade, and combined into genome-wide weighted means.

pub mod analysis;

pub use analysis::{
    aggregate, AnalysisConfig, DiversityEngine, DiversityReport, Statistic, StatisticResult,
    UnweightedPolicy,
};
