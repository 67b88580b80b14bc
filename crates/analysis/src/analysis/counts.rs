//! Allele counting
//!
//! Converts a slice of the genotype tensor (a set of variants and a set of
//! samples) into per-site allele counts. Every statistic starts here.

use ndarray::{Array2, ArrayView1, ArrayView3, Axis};
use sumstats_core::errors::ComputationError;

/// Per-variant allele counts, indexed `[variant, allele]`.
///
/// Row sums are the number of called (non-missing) alleles at each site.
#[derive(Debug, Clone, PartialEq)]
pub struct AlleleCounts {
    counts: Array2<u32>,
}

impl AlleleCounts {
    /// Wrap an existing count matrix.
    pub fn from_array(counts: Array2<u32>) -> Self {
        Self { counts }
    }

    pub fn n_variants(&self) -> usize {
        self.counts.nrows()
    }

    /// Width of the count rows: highest allele index observed plus one.
    pub fn n_alleles(&self) -> usize {
        self.counts.ncols()
    }

    pub fn row(&self, variant: usize) -> ArrayView1<'_, u32> {
        self.counts.row(variant)
    }

    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, u32>> {
        self.counts.axis_iter(Axis(0))
    }

    pub fn as_array(&self) -> &Array2<u32> {
        &self.counts
    }

    /// Number of called alleles at a site (`an`).
    pub fn allele_number(&self, variant: usize) -> u32 {
        self.counts.row(variant).sum()
    }

    /// Largest allele number over all sites; the sample size used by the
    /// segregating-site estimators.
    pub fn max_allele_number(&self) -> u32 {
        self.rows().map(|row| row.sum()).max().unwrap_or(0)
    }

    /// Whether more than one distinct allele is observed at a site.
    pub fn is_segregating(&self, variant: usize) -> bool {
        is_segregating_row(self.counts.row(variant))
    }

    /// Count of segregating sites.
    pub fn segregating_sites(&self) -> usize {
        self.rows().filter(|row| is_segregating_row(*row)).count()
    }

    /// Allele frequencies at a site, `None` if nothing is called there.
    pub fn frequencies(&self, variant: usize) -> Option<Vec<f64>> {
        let row = self.counts.row(variant);
        let an = row.sum();
        if an == 0 {
            return None;
        }
        Some(row.iter().map(|&c| c as f64 / an as f64).collect())
    }
}

fn is_segregating_row(row: ArrayView1<'_, u32>) -> bool {
    row.iter().filter(|&&c| c > 0).count() > 1
}

/// Count alleles for the given variants and samples.
///
/// All ploidy slots of every selected call contribute; negative (missing)
/// values are skipped. The row width is sized to the highest allele index
/// found in the selected sub-tensor, so biallelic and multiallelic sites are
/// counted consistently within one call. A fully missing variant gives an
/// all-zero row.
///
/// # Arguments
///
/// * `genotypes` - Tensor `[variant, sample, slot]`
/// * `variants` - Variant indices, in output row order
/// * `samples` - Sample indices
///
/// # Errors
///
/// [`ComputationError::IndexOutOfBounds`] if any index is outside the tensor.
pub fn count_alleles(
    genotypes: ArrayView3<'_, i8>,
    variants: &[usize],
    samples: &[usize],
) -> Result<AlleleCounts, ComputationError> {
    let (n_variants, n_samples, _) = genotypes.dim();
    check_bounds("variant", variants, n_variants)?;
    check_bounds("sample", samples, n_samples)?;

    let mut max_allele: i8 = -1;
    for &v in variants {
        let site = genotypes.index_axis(Axis(0), v);
        for &s in samples {
            if let Some(&m) = site.row(s).iter().max() {
                max_allele = max_allele.max(m);
            }
        }
    }
    let width = (max_allele as i16 + 1) as usize;

    let mut counts = Array2::<u32>::zeros((variants.len(), width));
    for (row, &v) in variants.iter().enumerate() {
        let site = genotypes.index_axis(Axis(0), v);
        for &s in samples {
            for &allele in site.row(s) {
                if allele >= 0 {
                    counts[[row, allele as usize]] += 1;
                }
            }
        }
    }

    Ok(AlleleCounts { counts })
}

/// [`count_alleles`] with a boolean variant mask instead of indices.
pub fn count_alleles_masked(
    genotypes: ArrayView3<'_, i8>,
    mask: &[bool],
    samples: &[usize],
) -> Result<AlleleCounts, ComputationError> {
    let n_variants = genotypes.dim().0;
    if mask.len() != n_variants {
        return Err(ComputationError::IndexOutOfBounds {
            axis: "variant mask",
            index: mask.len(),
            len: n_variants,
        });
    }
    count_alleles(genotypes, &mask_to_indices(mask), samples)
}

/// Indices of the `true` entries of a mask.
pub fn mask_to_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &keep)| keep.then_some(i))
        .collect()
}

pub(crate) fn check_bounds(
    axis: &'static str,
    indices: &[usize],
    len: usize,
) -> Result<(), ComputationError> {
    match indices.iter().find(|&&i| i >= len) {
        Some(&index) => Err(ComputationError::IndexOutOfBounds { axis, index, len }),
        None => Ok(()),
    }
}
