//! Heterozygosity and inbreeding
//!
//! Per-variant observed heterozygosity, Hardy-Weinberg expected
//! heterozygosity and the inbreeding coefficient F.
//!
//! Observed heterozygosity works on genotype calls directly; the expected
//! value works on allele frequencies with an explicit ploidy term. Both assume
//! diploid calls by default: callers analysing other ploidies must pass the
//! matching ploidy and read F with that in mind.

use crate::analysis::counts::{check_bounds, count_alleles, AlleleCounts};
use crate::analysis::result::serialize_finite;
use ndarray::{ArrayView3, Axis};
use serde::Serialize;
use sumstats_core::errors::ComputationError;
use sumstats_core::Callset;

/// Ploidy assumed by the Hardy-Weinberg expectation unless told otherwise.
pub const DEFAULT_PLOIDY: usize = 2;

/// Fraction of called genotypes that are heterozygous, per variant.
///
/// A call is counted only when every allele slot is non-missing; it is
/// heterozygous when its slots are not all the same allele. Sites with no
/// complete call are `NaN`.
pub fn observed_heterozygosity(
    genotypes: ArrayView3<'_, i8>,
    variants: &[usize],
    samples: &[usize],
) -> Result<Vec<f64>, ComputationError> {
    let (n_variants, n_samples, _) = genotypes.dim();
    check_bounds("variant", variants, n_variants)?;
    check_bounds("sample", samples, n_samples)?;

    Ok(variants
        .iter()
        .map(|&v| {
            let site = genotypes.index_axis(Axis(0), v);
            let mut called = 0usize;
            let mut het = 0usize;
            for &s in samples {
                let call = site.row(s);
                if call.iter().any(|&a| a < 0) {
                    continue;
                }
                called += 1;
                if let Some(&first) = call.first() {
                    if call.iter().any(|&a| a != first) {
                        het += 1;
                    }
                }
            }
            if called == 0 {
                f64::NAN
            } else {
                het as f64 / called as f64
            }
        })
        .collect())
}

/// Hardy-Weinberg expected heterozygosity, per variant.
///
/// # Formula
///
/// $$H_e = 1 - \sum_i p_i^{k}$$
///
/// where $p_i$ are the observed allele frequencies and $k$ the ploidy
/// (2 for diploids, giving the familiar $1 - \sum p_i^2$).
///
/// # Errors
///
/// [`ComputationError::InvalidPloidy`] when `ploidy` is zero.
pub fn expected_heterozygosity(
    counts: &AlleleCounts,
    ploidy: usize,
) -> Result<Vec<f64>, ComputationError> {
    if ploidy == 0 {
        return Err(ComputationError::InvalidPloidy(ploidy));
    }
    let exponent = i32::try_from(ploidy).map_err(|_| ComputationError::InvalidPloidy(ploidy))?;

    Ok((0..counts.n_variants())
        .map(|v| match counts.frequencies(v) {
            Some(freqs) => 1.0 - freqs.iter().map(|p| p.powi(exponent)).sum::<f64>(),
            None => f64::NAN,
        })
        .collect())
}

/// Inbreeding coefficient per variant, `F = 1 - Ho / He`.
///
/// `NaN` where He is zero (monomorphic site) or either input is undefined.
///
/// # Errors
///
/// [`ComputationError::ShapeMismatch`] when the inputs differ in length.
pub fn inbreeding_coefficient(
    observed: &[f64],
    expected: &[f64],
) -> Result<Vec<f64>, ComputationError> {
    if observed.len() != expected.len() {
        return Err(ComputationError::ShapeMismatch {
            left: observed.len(),
            right: expected.len(),
        });
    }

    Ok(observed
        .iter()
        .zip(expected)
        .map(|(&ho, &he)| {
            if he > 0.0 && ho.is_finite() {
                1.0 - ho / he
            } else {
                f64::NAN
            }
        })
        .collect())
}

/// Heterozygosity summary of one variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantHeterozygosity {
    pub contig: String,
    pub position: i64,
    #[serde(serialize_with = "serialize_finite")]
    pub observed: f64,
    #[serde(serialize_with = "serialize_finite")]
    pub expected: f64,
    #[serde(serialize_with = "serialize_finite")]
    pub inbreeding: f64,
}

/// Ho, He and F for every variant of the callset over a sample subset.
///
/// # Arguments
///
/// * `callset` - Source callset
/// * `samples` - Sample indices to include
/// * `ploidy` - Ploidy term of the Hardy-Weinberg expectation
pub fn heterozygosity_profile(
    callset: &Callset,
    samples: &[usize],
    ploidy: usize,
) -> Result<Vec<VariantHeterozygosity>, ComputationError> {
    let variants: Vec<usize> = (0..callset.n_variants()).collect();
    let genotypes = callset.genotypes();

    let counts = count_alleles(genotypes, &variants, samples)?;
    let observed = observed_heterozygosity(genotypes, &variants, samples)?;
    let expected = expected_heterozygosity(&counts, ploidy)?;
    let inbreeding = inbreeding_coefficient(&observed, &expected)?;

    Ok(variants
        .iter()
        .map(|&v| VariantHeterozygosity {
            contig: callset.contigs()[v].clone(),
            position: callset.positions()[v],
            observed: observed[v],
            expected: expected[v],
            inbreeding: inbreeding[v],
        })
        .collect())
}
