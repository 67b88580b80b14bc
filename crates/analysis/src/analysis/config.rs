//! Analysis parameters and configuration.
//!
//! [`AnalysisConfig`] can be deserialized from a (partial) JSON file; every
//! missing field takes its default, so `{}` is a valid configuration.

use crate::analysis::genome_wide::UnweightedPolicy;
use crate::analysis::heterozygosity::DEFAULT_PLOIDY;
use serde::{Deserialize, Serialize};

/// Statistics the engine can compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statistic {
    /// Nucleotide diversity (π)
    #[serde(rename = "pi")]
    NucleotideDiversity,
    /// Watterson's θ_W
    #[serde(rename = "theta_w")]
    WattersonTheta,
    #[serde(rename = "tajima_d")]
    TajimaD,
    #[serde(rename = "observed_het")]
    ObservedHeterozygosity,
    /// Hardy-Weinberg expected heterozygosity
    #[serde(rename = "expected_het")]
    ExpectedHeterozygosity,
    #[serde(rename = "inbreeding")]
    InbreedingCoefficient,
}

impl Statistic {
    /// Every statistic, in report order.
    pub const ALL: [Statistic; 6] = [
        Self::NucleotideDiversity,
        Self::WattersonTheta,
        Self::TajimaD,
        Self::ObservedHeterozygosity,
        Self::ExpectedHeterozygosity,
        Self::InbreedingCoefficient,
    ];

    /// Short name used in CLI arguments and output documents.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NucleotideDiversity => "pi",
            Self::WattersonTheta => "theta_w",
            Self::TajimaD => "tajima_d",
            Self::ObservedHeterozygosity => "observed_het",
            Self::ExpectedHeterozygosity => "expected_het",
            Self::InbreedingCoefficient => "inbreeding",
        }
    }
}

impl std::fmt::Display for Statistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Statistic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pi" => Ok(Self::NucleotideDiversity),
            "theta_w" | "w" => Ok(Self::WattersonTheta),
            "tajima_d" | "d" => Ok(Self::TajimaD),
            "observed_het" => Ok(Self::ObservedHeterozygosity),
            "expected_het" => Ok(Self::ExpectedHeterozygosity),
            "inbreeding" => Ok(Self::InbreedingCoefficient),
            _ => Err(format!(
                "Unknown statistic: {s}. Available: pi, theta_w, tajima_d, observed_het, expected_het, inbreeding"
            )),
        }
    }
}

/// Engine and aggregation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Report population and clade entries per contig (otherwise the
    /// population entry is one pooled value)
    pub resolve_contigs: bool,
    /// Add one flat entry per sample
    pub per_sample: bool,
    /// Ploidy term of the Hardy-Weinberg expectation
    pub ploidy: usize,
    /// Fewest segregating sites for which Tajima's D is reported
    pub min_segregating_sites: usize,
    /// Genome-wide value when no contig of an entry has a weight
    pub unweighted_policy: UnweightedPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            resolve_contigs: true,
            per_sample: false,
            ploidy: DEFAULT_PLOIDY,
            min_segregating_sites: 1,
            unweighted_policy: UnweightedPolicy::default(),
        }
    }
}
