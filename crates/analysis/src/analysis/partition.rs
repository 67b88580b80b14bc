//! Partitioning a callset by contig and by sample subset.
//!
//! Contigs are enumerated in order of first appearance along the variant axis
//! and sample indices are always returned in callset order, so every partition
//! is deterministic for a given callset.

use std::collections::HashSet;
use sumstats_core::errors::ValidationError;
use sumstats_core::Callset;

/// Derives variant masks and sample index sets from a borrowed callset.
#[derive(Debug, Clone)]
pub struct Partitioner<'a> {
    callset: &'a Callset,
    contigs: Vec<&'a str>,
}

impl<'a> Partitioner<'a> {
    pub fn new(callset: &'a Callset) -> Self {
        let mut seen = HashSet::new();
        let contigs = callset
            .contigs()
            .iter()
            .map(String::as_str)
            .filter(|label| seen.insert(*label))
            .collect();

        Self { callset, contigs }
    }

    pub fn callset(&self) -> &'a Callset {
        self.callset
    }

    /// Distinct contig labels in order of first occurrence.
    pub fn contigs(&self) -> &[&'a str] {
        &self.contigs
    }

    /// Mask over the variant axis selecting one contig.
    ///
    /// An unknown label yields an all-`false` mask.
    pub fn contig_mask(&self, label: &str) -> Vec<bool> {
        self.callset.contigs().iter().map(|c| c == label).collect()
    }

    /// Variant indices on one contig, ascending.
    pub fn contig_variants(&self, label: &str) -> Vec<usize> {
        self.callset
            .contigs()
            .iter()
            .enumerate()
            .filter_map(|(i, c)| (c == label).then_some(i))
            .collect()
    }

    /// Every variant index.
    pub fn all_variants(&self) -> Vec<usize> {
        (0..self.callset.n_variants()).collect()
    }

    /// Every sample index.
    pub fn all_samples(&self) -> Vec<usize> {
        (0..self.callset.n_samples()).collect()
    }

    /// Resolve sample identifiers to tensor indices.
    ///
    /// Indices come back in callset order regardless of request order, with
    /// duplicates collapsed: requesting `["S3", "S1"]` from samples
    /// `["S1", "S2", "S3"]` gives `[0, 2]`.
    ///
    /// # Errors
    ///
    /// [`ValidationError::UnknownSample`] naming the first identifier, in
    /// request order, that is not in the callset.
    pub fn sample_indices<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<usize>, ValidationError> {
        let mut indices = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let idx = self
                .callset
                .sample_index(name)
                .ok_or_else(|| ValidationError::UnknownSample(name.to_string()))?;
            indices.push(idx);
        }
        indices.sort_unstable();
        indices.dedup();
        Ok(indices)
    }
}
