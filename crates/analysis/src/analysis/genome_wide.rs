//! Genome-wide aggregation
//!
//! Combines the per-contig values of each contig-resolved entry into one
//! weighted mean, using externally supplied contig weights such as
//! chromosome lengths.

use crate::analysis::result::{ContigValues, StatValue, StatisticResult};
use serde::{Deserialize, Serialize};
use sumstats_core::ContigWeights;

/// Genome-wide value written when none of an entry's contigs can be weighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnweightedPolicy {
    /// Write `0`
    #[default]
    Zero,
    /// Write `NaN` (serialized as `null`)
    Nan,
}

impl UnweightedPolicy {
    fn fallback(self) -> f64 {
        match self {
            Self::Zero => 0.0,
            Self::Nan => f64::NAN,
        }
    }
}

impl std::fmt::Display for UnweightedPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zero => write!(f, "zero"),
            Self::Nan => write!(f, "nan"),
        }
    }
}

impl std::str::FromStr for UnweightedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zero" | "0" => Ok(Self::Zero),
            "nan" | "null" => Ok(Self::Nan),
            _ => Err(format!("Unknown unweighted policy: {s}. Available: zero, nan")),
        }
    }
}

/// Weighted mean of per-contig values.
///
/// # Formula
///
/// $$\bar{x} = \frac{\sum_c x_c w_c}{\sum_c w_c}$$
///
/// over contigs $c$ that have a weight and a finite value. Contigs without a
/// weight are left out rather than counted as zero; undefined (`NaN`) contig
/// values are left out as well.
///
/// # Returns
///
/// `None` when no contig has a weight. `Some(NaN)` when weighted contigs
/// exist but none of them has a defined value.
pub fn weighted_mean<'v, I>(values: I, weights: &ContigWeights) -> Option<f64>
where
    I: IntoIterator<Item = (&'v str, f64)>,
{
    let mut any_weighted = false;
    let (weighted_sum, total_weight) = values
        .into_iter()
        .filter_map(|(contig, value)| weights.get(contig).map(|w| (value, w)))
        .inspect(|_| any_weighted = true)
        .filter(|(value, _)| value.is_finite())
        .fold((0.0, 0.0), |(sum, total), (value, w)| {
            (sum + value * w, total + w)
        });

    if !any_weighted {
        return None;
    }
    if total_weight > 0.0 {
        Some(weighted_sum / total_weight)
    } else {
        Some(f64::NAN)
    }
}

/// Add a `"genome-wide"` value to every contig-resolved entry of `result`.
///
/// Scalar entries are left untouched. When no contig of an entry has a
/// weight, the value is chosen by `policy`. An entry whose weighted contigs
/// are all undefined gets `NaN` regardless of `policy`.
///
/// # Returns
///
/// Number of entries with at least one weighted contig (fallbacks excluded).
pub fn aggregate(
    result: &mut StatisticResult,
    weights: &ContigWeights,
    policy: UnweightedPolicy,
) -> usize {
    let mut weighted = 0;
    for value in result.values_mut() {
        if let StatValue::Contigs(contigs) = value {
            if aggregate_entry(contigs, weights, policy) {
                weighted += 1;
            }
        }
    }
    weighted
}

fn aggregate_entry(
    contigs: &mut ContigValues,
    weights: &ContigWeights,
    policy: UnweightedPolicy,
) -> bool {
    match weighted_mean(contigs.iter(), weights) {
        Some(mean) => {
            contigs.set_genome_wide(mean);
            true
        }
        None => {
            tracing::debug!("No weighted contig in entry, genome-wide falls back to {policy}");
            contigs.set_genome_wide(policy.fallback());
            false
        }
    }
}
