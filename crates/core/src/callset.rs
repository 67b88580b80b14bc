//! In-memory callset.
//!
//! A [`Callset`] is the read-only snapshot of the fields of a variant-call file
//! that the statistics need: sample identifiers, per-variant positions and
//! contig labels, and the genotype tensor indexed `[variant, sample, slot]`.

use crate::errors::CallsetError;
use ndarray::{Array3, ArrayView3};
use std::collections::HashMap;

/// Genotype value marking a missing allele call. Any negative value is
/// treated as missing; this is the one written by [`Callset`] helpers.
pub const MISSING: i8 = -1;

/// Immutable genotype calls with their sample and variant annotations.
#[derive(Debug, Clone)]
pub struct Callset {
    samples: Vec<String>,
    positions: Vec<i64>,
    contigs: Vec<String>,
    genotypes: Array3<i8>,
    sample_lookup: HashMap<String, usize>,
}

impl Callset {
    /// Build a callset, checking that every field agrees with the tensor shape.
    ///
    /// # Errors
    ///
    /// Returns a [`CallsetError`] when positions, contigs or samples disagree
    /// with the tensor axes, when a sample identifier is repeated, or when the
    /// ploidy axis is empty.
    pub fn new(
        samples: Vec<String>,
        positions: Vec<i64>,
        contigs: Vec<String>,
        genotypes: Array3<i8>,
    ) -> Result<Self, CallsetError> {
        let (n_variants, n_samples, ploidy) = genotypes.dim();

        if ploidy == 0 {
            return Err(CallsetError::EmptyPloidy);
        }
        if samples.len() != n_samples {
            return Err(CallsetError::LengthMismatch {
                field: "samples",
                expected: n_samples,
                found: samples.len(),
            });
        }
        if positions.len() != n_variants {
            return Err(CallsetError::LengthMismatch {
                field: "positions",
                expected: n_variants,
                found: positions.len(),
            });
        }
        if contigs.len() != n_variants {
            return Err(CallsetError::LengthMismatch {
                field: "contigs",
                expected: n_variants,
                found: contigs.len(),
            });
        }

        let mut sample_lookup = HashMap::with_capacity(samples.len());
        for (idx, id) in samples.iter().enumerate() {
            if sample_lookup.insert(id.clone(), idx).is_some() {
                return Err(CallsetError::DuplicateSample(id.clone()));
            }
        }

        Ok(Self {
            samples,
            positions,
            contigs,
            genotypes,
            sample_lookup,
        })
    }

    /// Sample identifiers in tensor order.
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Genomic coordinate of each variant.
    pub fn positions(&self) -> &[i64] {
        &self.positions
    }

    /// Contig label of each variant.
    pub fn contigs(&self) -> &[String] {
        &self.contigs
    }

    /// Borrowed view of the genotype tensor `[variant, sample, slot]`.
    pub fn genotypes(&self) -> ArrayView3<'_, i8> {
        self.genotypes.view()
    }

    pub fn n_variants(&self) -> usize {
        self.genotypes.dim().0
    }

    pub fn n_samples(&self) -> usize {
        self.genotypes.dim().1
    }

    /// Number of allele slots per call (2 for diploid data).
    pub fn ploidy(&self) -> usize {
        self.genotypes.dim().2
    }

    /// Position of a sample identifier in [`Self::samples`].
    pub fn sample_index(&self, id: &str) -> Option<usize> {
        self.sample_lookup.get(id).copied()
    }

    /// Count of allele slots holding a missing value.
    pub fn missing_calls(&self) -> usize {
        self.genotypes.iter().filter(|&&allele| allele < 0).count()
    }
}
