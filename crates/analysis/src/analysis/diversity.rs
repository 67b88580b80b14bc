//! Diversity metrics for population genetics
//!
//! Implements standard measures of genetic diversity from allele counts:
//! - Nucleotide diversity (π)
//! - Watterson's estimator (θ_W)
//! - Tajima's D
//!
//! Sites with fewer than two called alleles carry no pairwise information and
//! are left out of the sums. Statistics with no defined value are `NaN`.

use crate::analysis::counts::AlleleCounts;
use crate::analysis::utils::{harmonic_number, harmonic_number_squared, nan_sum, span};
use sumstats_core::errors::ComputationError;

/// Pairwise comparison counts at one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SitePairs {
    /// Unordered pairs of allele copies carrying different alleles
    pub differing: u64,
    /// All unordered pairs of called allele copies, `an(an-1)/2`
    pub total: u64,
}

impl SitePairs {
    /// Proportion of differing pairs, `NaN` with fewer than two copies.
    pub fn mean_difference(&self) -> f64 {
        if self.total == 0 {
            f64::NAN
        } else {
            self.differing as f64 / self.total as f64
        }
    }
}

/// Count differing and total allele pairs at every site.
pub fn pairwise_differences(counts: &AlleleCounts) -> Vec<SitePairs> {
    counts
        .rows()
        .map(|row| {
            let an = row.sum() as u64;
            let total = an * an.saturating_sub(1) / 2;
            let same: u64 = row
                .iter()
                .map(|&c| {
                    let c = c as u64;
                    c * c.saturating_sub(1) / 2
                })
                .sum();
            SitePairs {
                differing: total - same,
                total,
            }
        })
        .collect()
}

/// Mean pairwise difference at every site.
///
/// The expected proportion of differing draws when two allele copies are
/// sampled without replacement (the unbiased per-site heterozygosity).
/// `NaN` where fewer than two alleles are called.
pub fn mean_pairwise_difference(counts: &AlleleCounts) -> Vec<f64> {
    pairwise_differences(counts)
        .iter()
        .map(SitePairs::mean_difference)
        .collect()
}

/// Count differing pairs between two disjoint sets of allele copies.
///
/// For each site this is `n_a * n_b - sum_i a_i * b_i`, the number of
/// cross-set pairs that carry different alleles. Together with the
/// within-set counts of [`pairwise_differences`] it decomposes the pairwise
/// differences of the pooled sample.
///
/// # Errors
///
/// [`ComputationError::ShapeMismatch`] when the two count matrices cover a
/// different number of variants.
pub fn between_pairwise_differences(
    a: &AlleleCounts,
    b: &AlleleCounts,
) -> Result<Vec<u64>, ComputationError> {
    if a.n_variants() != b.n_variants() {
        return Err(ComputationError::ShapeMismatch {
            left: a.n_variants(),
            right: b.n_variants(),
        });
    }

    Ok(a
        .rows()
        .zip(b.rows())
        .map(|(ra, rb)| {
            let na = ra.sum() as u64;
            let nb = rb.sum() as u64;
            // Rows may differ in width; missing columns are zero counts
            let shared: u64 = ra
                .iter()
                .zip(rb.iter())
                .map(|(&x, &y)| x as u64 * y as u64)
                .sum();
            na * nb - shared
        })
        .collect())
}

/// Calculate nucleotide diversity (π)
///
/// Sum of per-site mean pairwise differences divided by the number of bases
/// spanned by the variants.
///
/// # Formula
///
/// $$\pi = \frac{\sum_{s} \frac{d_s}{\binom{n_s}{2}}}{L}$$
///
/// where $d_s$ is the number of differing allele pairs at site $s$, $n_s$ the
/// number of called alleles there, and $L = \max(pos) - \min(pos) + 1$.
///
/// # Arguments
///
/// * `positions` - Position of each counted variant
/// * `counts` - Allele counts, one row per position
///
/// # Returns
///
/// π per base; `NaN` with no variants. Sites with fewer than two called
/// alleles contribute nothing to the sum.
///
/// # References
///
/// Nei, M., & Li, W. H. (1979). Mathematical model for studying genetic
/// variation in terms of restriction endonucleases. PNAS, 76(10), 5269-5273.
pub fn sequence_diversity(
    positions: &[i64],
    counts: &AlleleCounts,
) -> Result<f64, ComputationError> {
    check_positions(positions, counts)?;
    let Some(length) = span(positions) else {
        return Ok(f64::NAN);
    };

    let mpd = mean_pairwise_difference(counts);
    Ok(nan_sum(&mpd) / length)
}

/// Calculate Watterson's estimator (θ_W)
///
/// Estimates θ = 4Nμ from the number of segregating sites.
///
/// # Formula
///
/// $$\theta_W = \frac{S}{a_n L}$$
///
/// where $S$ is the number of segregating sites,
/// $a_n = \sum_{i=1}^{n-1} \frac{1}{i}$ with $n$ the largest number of called
/// alleles at any site, and $L$ the number of bases spanned.
///
/// # Returns
///
/// θ_W per base; `NaN` with no variants or fewer than two called alleles at
/// every site.
///
/// # References
///
/// Watterson, G. A. (1975). On the number of segregating sites in genetical
/// models without recombination. Theoretical Population Biology, 7(2), 256-276.
pub fn watterson_theta(positions: &[i64], counts: &AlleleCounts) -> Result<f64, ComputationError> {
    check_positions(positions, counts)?;
    let Some(length) = span(positions) else {
        return Ok(f64::NAN);
    };

    let n = counts.max_allele_number() as usize;
    if n < 2 {
        return Ok(f64::NAN);
    }

    let s = counts.segregating_sites() as f64;
    let a_n = harmonic_number(n);

    Ok(s / (a_n * length))
}

/// Calculate Tajima's D statistic
///
/// Tajima's D tests the hypothesis of neutral evolution by comparing
/// two estimates of θ: one based on the number of segregating sites
/// and one based on nucleotide diversity. Both are taken as absolute
/// values over the counted sites, so no sequence length is needed.
///
/// # Formula
///
/// $$D = \frac{\hat\theta_\pi - S/a_1}{\sqrt{e_1 S + e_2 S (S - 1)}}$$
///
/// Positive D suggests balancing selection or population contraction.
/// Negative D suggests purifying selection or population expansion.
///
/// # Arguments
///
/// * `counts` - Allele counts of the sites to test
/// * `min_sites` - Fewest segregating sites for which D is reported
///
/// # Returns
///
/// Tajima's D, or `NaN` when fewer than two alleles are sampled, no site
/// segregates, fewer than `min_sites` sites segregate, or the variance term is
/// not positive.
///
/// # References
///
/// Tajima, F. (1989). Statistical method for testing the neutral mutation
/// hypothesis by DNA polymorphism. Genetics, 123(3), 585-595.
pub fn tajima_d(counts: &AlleleCounts, min_sites: usize) -> f64 {
    let n = counts.max_allele_number() as usize;
    if n < 2 {
        return f64::NAN;
    }

    let segregating = counts.segregating_sites();
    if segregating == 0 || segregating < min_sites {
        return f64::NAN;
    }

    // Calculate variance components
    let n_f64 = n as f64;
    let a1 = harmonic_number(n);
    let a2 = harmonic_number_squared(n);

    let b1 = (n_f64 + 1.0) / (3.0 * (n_f64 - 1.0));
    let b2 = 2.0 * (n_f64 * n_f64 + n_f64 + 3.0) / (9.0 * n_f64 * (n_f64 - 1.0));

    let c1 = b1 - 1.0 / a1;
    let c2 = b2 - (n_f64 + 2.0) / (a1 * n_f64) + a2 / (a1 * a1);

    let e1 = c1 / a1;
    let e2 = c2 / (a1 * a1 + a2);

    let s = segregating as f64;
    let theta_pi = nan_sum(&mean_pairwise_difference(counts));
    let theta_w = s / a1;

    // Variance of (π - θ_W)
    let var = e1 * s + e2 * s * (s - 1.0);
    if var <= 0.0 {
        return f64::NAN;
    }

    (theta_pi - theta_w) / var.sqrt()
}

// ===== Helper Functions =====

fn check_positions(positions: &[i64], counts: &AlleleCounts) -> Result<(), ComputationError> {
    if positions.len() != counts.n_variants() {
        return Err(ComputationError::ShapeMismatch {
            left: positions.len(),
            right: counts.n_variants(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::counts::count_alleles;
    use ndarray::{array, Array3};

    fn counts(rows: ndarray::Array2<u32>) -> AlleleCounts {
        AlleleCounts::from_array(rows)
    }

    /// 4 diploid samples, 3 biallelic variants, no missing data.
    fn four_sample_tensor() -> Array3<i8> {
        Array3::from_shape_vec(
            (3, 4, 2),
            vec![
                0, 1, 0, 0, 1, 1, 0, 0, // v0
                0, 0, 0, 0, 0, 1, 0, 1, // v1
                1, 1, 0, 1, 0, 0, 1, 0, // v2
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_mean_pairwise_difference_known_values() {
        // [3, 1]: 6 pairs, 3 identical -> 0.5
        // [2, 2]: 6 pairs, 2 identical -> 2/3
        // [4, 0]: monomorphic -> 0
        let ac = counts(array![[3, 1], [2, 2], [4, 0]]);
        let mpd = mean_pairwise_difference(&ac);
        assert!((mpd[0] - 0.5).abs() < 1e-12);
        assert!((mpd[1] - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(mpd[2], 0.0);
    }

    #[test]
    fn test_mean_pairwise_difference_undefined_site() {
        let ac = counts(array![[1, 0], [0, 0]]);
        let mpd = mean_pairwise_difference(&ac);
        assert!(mpd[0].is_nan());
        assert!(mpd[1].is_nan());
    }

    #[test]
    fn test_sequence_diversity() {
        let ac = counts(array![[3, 1], [2, 2], [4, 0]]);
        // Sites span 1..=10
        let pi = sequence_diversity(&[1, 5, 10], &ac).unwrap();
        assert!((pi - (0.5 + 2.0 / 3.0) / 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_sequence_diversity_skips_undefined_sites() {
        let ac = counts(array![[3, 1], [0, 0]]);
        let pi = sequence_diversity(&[1, 2], &ac).unwrap();
        assert!((pi - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_sequence_diversity_no_variants() {
        let ac = counts(ndarray::Array2::zeros((0, 0)));
        assert!(sequence_diversity(&[], &ac).unwrap().is_nan());
    }

    #[test]
    fn test_sequence_diversity_shape_mismatch() {
        let ac = counts(array![[3, 1]]);
        let err = sequence_diversity(&[1, 2], &ac).unwrap_err();
        assert_eq!(err, ComputationError::ShapeMismatch { left: 2, right: 1 });
    }

    #[test]
    fn test_pairwise_decomposition_over_complementary_subsets() {
        let g = four_sample_tensor();
        let variants = [0, 1, 2];
        let full = count_alleles(g.view(), &variants, &[0, 1, 2, 3]).unwrap();
        let left = count_alleles(g.view(), &variants, &[0, 2]).unwrap();
        let right = count_alleles(g.view(), &variants, &[1, 3]).unwrap();

        let full_pairs = pairwise_differences(&full);
        let left_pairs = pairwise_differences(&left);
        let right_pairs = pairwise_differences(&right);
        let between = between_pairwise_differences(&left, &right).unwrap();

        for v in 0..variants.len() {
            // 8 copies: 28 pairs = 6 + 6 within, 16 between
            assert_eq!(full_pairs[v].total, 28);
            assert_eq!(
                full_pairs[v].total,
                left_pairs[v].total + right_pairs[v].total + 16
            );
            assert_eq!(
                full_pairs[v].differing,
                left_pairs[v].differing + right_pairs[v].differing + between[v]
            );
        }

        // Reweighting the parts by their pair counts recovers pi of the whole
        let positions = [1, 2, 3];
        let recombined: f64 = (0..variants.len())
            .map(|v| {
                (left_pairs[v].differing + right_pairs[v].differing + between[v]) as f64
                    / (left_pairs[v].total + right_pairs[v].total + 16) as f64
            })
            .sum::<f64>()
            / 3.0;
        let pi = sequence_diversity(&positions, &full).unwrap();
        assert!((pi - recombined).abs() < 1e-12);
    }

    #[test]
    fn test_between_pairwise_differences_width_mismatch() {
        // Right subset never sees allele 2
        let a = counts(array![[1, 0, 1]]);
        let b = counts(array![[2]]);
        assert_eq!(between_pairwise_differences(&a, &b).unwrap(), vec![2]);

        let c = counts(array![[1, 1], [2, 0]]);
        assert!(between_pairwise_differences(&a, &c).is_err());
    }

    #[test]
    fn test_wattersons_theta_no_variation() {
        let ac = counts(array![[4, 0], [0, 4]]);
        assert_eq!(watterson_theta(&[1, 100], &ac).unwrap(), 0.0);
    }

    #[test]
    fn test_wattersons_theta_with_variation() {
        // 4 sampled copies: a_n = 1 + 1/2 + 1/3
        // S = 1 segregating site over 100 bases
        let ac = counts(array![[3, 1], [4, 0]]);
        let theta = watterson_theta(&[1, 100], &ac).unwrap();
        let a_4 = 1.0 + 0.5 + 1.0 / 3.0;
        assert!((theta - 1.0 / (a_4 * 100.0)).abs() < 1e-10);
    }

    #[test]
    fn test_wattersons_theta_too_few_alleles() {
        // At most one called allele at every site
        let ac = counts(array![[1, 0], [0, 1], [0, 0]]);
        assert!(watterson_theta(&[1, 2, 3], &ac).unwrap().is_nan());
    }

    #[test]
    fn test_tajimas_d_single_segregating_site() {
        // n = 4, S = 1, pi = 0.5
        // D = (1/2 - 6/11) / sqrt(e1) with e1 = 6/1089, i.e. -sqrt(6)/4
        let ac = counts(array![[3, 1]]);
        let d = tajima_d(&ac, 1);
        assert!((d - (-(6.0f64).sqrt() / 4.0)).abs() < 1e-12);
    }

    #[test]
    fn test_tajimas_d_no_segregating_sites() {
        let ac = counts(array![[4, 0], [0, 4]]);
        assert!(tajima_d(&ac, 1).is_nan());
    }

    #[test]
    fn test_tajimas_d_min_sites() {
        let ac = counts(array![[3, 1], [2, 2]]);
        assert!(tajima_d(&ac, 2).is_finite());
        assert!(tajima_d(&ac, 3).is_nan());
    }

    #[test]
    fn test_tajimas_d_symmetric_in_allele_labels() {
        let ac = counts(array![[3, 1], [2, 2], [1, 3]]);
        let flipped = counts(array![[1, 3], [2, 2], [3, 1]]);
        assert_eq!(tajima_d(&ac, 1), tajima_d(&flipped, 1));
    }
}
