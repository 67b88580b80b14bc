//! Diversity engine
//!
//! Orchestrates partitioning, allele counting and the statistic formulas to
//! build a [`StatisticResult`] with a population entry, optional per-sample
//! entries and one entry per clade.
//!
//! Failures are contained to the smallest unit: an unknown sample in a clade
//! drops that clade only, and a computation failure for one contig or sample
//! is recorded as `NaN`. Both are reported in [`DiversityReport::failures`].
//!
//! Units run on the rayon pool. Results are collected in declared order
//! (contigs by first occurrence, samples in callset order, clades by label)
//! and each unit accumulates over its variants sequentially, so output is
//! identical from run to run.

use crate::analysis::config::{AnalysisConfig, Statistic};
use crate::analysis::counts::count_alleles;
use crate::analysis::diversity::{sequence_diversity, tajima_d, watterson_theta};
use crate::analysis::heterozygosity::{
    expected_heterozygosity, inbreeding_coefficient, observed_heterozygosity,
};
use crate::analysis::partition::Partitioner;
use crate::analysis::result::{ContigValues, StatValue, StatisticResult, POPULATION_KEY};
use crate::analysis::utils::nan_mean;
use rayon::prelude::*;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use sumstats_core::errors::{ComputationError, ValidationError};
use sumstats_core::{Callset, CladeMap};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why one unit of a report has no (defined) value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Computation(#[from] ComputationError),
}

/// A contained failure: the unit it happened in and the cause.
///
/// Units are named by entry key, with `"/contig"` appended for a single
/// contig of a contig-resolved entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFailure {
    pub unit: String,
    pub error: UnitError,
}

impl Serialize for UnitFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("UnitFailure", 2)?;
        state.serialize_field("unit", &self.unit)?;
        state.serialize_field("error", &self.error.to_string())?;
        state.end()
    }
}

/// Output of one [`DiversityEngine::compute`] call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiversityReport {
    pub statistic: Statistic,
    pub result: StatisticResult,
    pub failures: Vec<UnitFailure>,
}

impl DiversityReport {
    /// Whether every requested unit was computed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Computes statistics over a borrowed callset.
#[derive(Debug, Clone)]
pub struct DiversityEngine<'a> {
    partitioner: Partitioner<'a>,
    contig_variants: Vec<(&'a str, Vec<usize>)>,
    config: AnalysisConfig,
}

impl<'a> DiversityEngine<'a> {
    pub fn new(callset: &'a Callset, config: AnalysisConfig) -> Self {
        let partitioner = Partitioner::new(callset);
        let contig_variants = partitioner
            .contigs()
            .iter()
            .map(|&label| (label, partitioner.contig_variants(label)))
            .collect();

        Self {
            partitioner,
            contig_variants,
            config,
        }
    }

    /// Compute one statistic for the population, optionally every sample,
    /// and every clade in `groups`.
    ///
    /// # Arguments
    ///
    /// * `statistic` - Statistic to compute
    /// * `groups` - Clade label to sample identifiers; `None` for population only
    pub fn compute(&self, statistic: Statistic, groups: Option<&CladeMap>) -> DiversityReport {
        let mut result = StatisticResult::new();
        let mut failures = Vec::new();

        let all_samples = self.partitioner.all_samples();
        let population = if self.config.resolve_contigs {
            let values = self.per_contig(statistic, POPULATION_KEY, &all_samples, &mut failures);
            StatValue::Contigs(values)
        } else {
            let variants = self.partitioner.all_variants();
            let value =
                self.contained(statistic, POPULATION_KEY, &variants, &all_samples, &mut failures);
            StatValue::Scalar(value)
        };
        result.insert(POPULATION_KEY, population);

        if self.config.per_sample {
            self.add_samples(statistic, &mut result, &mut failures);
        }

        if let Some(groups) = groups {
            self.add_clades(statistic, groups, &mut result, &mut failures);
        }

        info!(
            statistic = %statistic,
            entries = result.len(),
            failures = failures.len(),
            "Computed statistic"
        );

        DiversityReport {
            statistic,
            result,
            failures,
        }
    }

    /// [`Self::compute`] for several statistics, in the given order.
    pub fn compute_all(
        &self,
        statistics: &[Statistic],
        groups: Option<&CladeMap>,
    ) -> Vec<DiversityReport> {
        statistics
            .iter()
            .map(|&stat| self.compute(stat, groups))
            .collect()
    }

    /// Evaluate a statistic on one variant set and sample set.
    ///
    /// # Errors
    ///
    /// [`ComputationError`] for indices outside the callset or an invalid
    /// ploidy setting. Undefined values are `Ok(NaN)`.
    pub fn evaluate(
        &self,
        statistic: Statistic,
        variants: &[usize],
        samples: &[usize],
    ) -> Result<f64, ComputationError> {
        let callset = self.partitioner.callset();
        let genotypes = callset.genotypes();
        let counts = count_alleles(genotypes, variants, samples)?;

        match statistic {
            Statistic::NucleotideDiversity => {
                sequence_diversity(&self.positions(variants), &counts)
            }
            Statistic::WattersonTheta => watterson_theta(&self.positions(variants), &counts),
            Statistic::TajimaD => Ok(tajima_d(&counts, self.config.min_segregating_sites)),
            Statistic::ObservedHeterozygosity => {
                let ho = observed_heterozygosity(genotypes, variants, samples)?;
                Ok(nan_mean(&ho))
            }
            Statistic::ExpectedHeterozygosity => {
                let he = expected_heterozygosity(&counts, self.config.ploidy)?;
                Ok(nan_mean(&he))
            }
            Statistic::InbreedingCoefficient => {
                let ho = observed_heterozygosity(genotypes, variants, samples)?;
                let he = expected_heterozygosity(&counts, self.config.ploidy)?;
                Ok(nan_mean(&inbreeding_coefficient(&ho, &he)?))
            }
        }
    }

    // ===== Helper Functions =====

    /// Positions of already bounds-checked variants.
    fn positions(&self, variants: &[usize]) -> Vec<i64> {
        let positions = self.partitioner.callset().positions();
        variants.iter().map(|&v| positions[v]).collect()
    }

    /// Evaluate, turning a failure into `NaN` plus a recorded failure.
    fn contained(
        &self,
        statistic: Statistic,
        unit: &str,
        variants: &[usize],
        samples: &[usize],
        failures: &mut Vec<UnitFailure>,
    ) -> f64 {
        match self.evaluate(statistic, variants, samples) {
            Ok(value) => value,
            Err(e) => {
                record(failures, unit.to_string(), e.into());
                f64::NAN
            }
        }
    }

    fn per_contig(
        &self,
        statistic: Statistic,
        entry: &str,
        samples: &[usize],
        failures: &mut Vec<UnitFailure>,
    ) -> ContigValues {
        debug!(statistic = %statistic, entry, contigs = self.contig_variants.len(), "Per-contig pass");

        let outcomes: Vec<(&str, Result<f64, ComputationError>)> = self
            .contig_variants
            .par_iter()
            .map(|(label, variants)| (*label, self.evaluate(statistic, variants, samples)))
            .collect();

        let mut values = ContigValues::new();
        for (label, outcome) in outcomes {
            let value = match outcome {
                Ok(value) => value,
                Err(e) => {
                    record(failures, format!("{entry}/{label}"), e.into());
                    f64::NAN
                }
            };
            values.push(label, value);
        }
        values
    }

    fn add_samples(
        &self,
        statistic: Statistic,
        result: &mut StatisticResult,
        failures: &mut Vec<UnitFailure>,
    ) {
        let variants = self.partitioner.all_variants();
        let n_samples = self.partitioner.callset().n_samples();
        let outcomes: Vec<Result<f64, ComputationError>> = (0..n_samples)
            .into_par_iter()
            .map(|s| self.evaluate(statistic, &variants, &[s]))
            .collect();

        for (id, outcome) in self.partitioner.callset().samples().iter().zip(outcomes) {
            let value = match outcome {
                Ok(value) => value,
                Err(e) => {
                    record(failures, id.clone(), e.into());
                    f64::NAN
                }
            };
            result.insert(id.as_str(), StatValue::Scalar(value));
        }
    }

    fn add_clades(
        &self,
        statistic: Statistic,
        groups: &CladeMap,
        result: &mut StatisticResult,
        failures: &mut Vec<UnitFailure>,
    ) {
        let clades: Vec<(&String, &Vec<String>)> = groups.iter().collect();
        let outcomes: Vec<(&String, Result<(ContigValues, Vec<UnitFailure>), ValidationError>)> =
            clades
                .par_iter()
                .map(|&(label, members)| {
                    let outcome = self
                        .partitioner
                        .sample_indices(members.as_slice())
                        .map(|samples| {
                            let mut clade_failures = Vec::new();
                            let values =
                                self.per_contig(statistic, label, &samples, &mut clade_failures);
                            (values, clade_failures)
                        });
                    (label, outcome)
                })
                .collect();

        for (label, outcome) in outcomes {
            match outcome {
                Ok((values, clade_failures)) => {
                    result.insert(label.as_str(), StatValue::Contigs(values));
                    failures.extend(clade_failures);
                }
                Err(e) => record(failures, label.clone(), e.into()),
            }
        }
    }
}

fn record(failures: &mut Vec<UnitFailure>, unit: String, error: UnitError) {
    warn!(unit = %unit, "Skipping unit: {error}");
    failures.push(UnitFailure { unit, error });
}
