//! Error types shared across the workspace.
//!
//! Failures are split by how far they propagate: a malformed [`Callset`]
//! aborts the whole run, a [`ValidationError`] aborts one sample group, and a
//! [`ComputationError`] is contained to the single unit (contig, sample or
//! clade) it occurred in. Mathematically undefined statistics are reported as
//! `NaN` and never surface here.
//!
//! [`Callset`]: crate::Callset

use thiserror::Error;

/// Errors raised while constructing a callset. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallsetError {
    /// A per-variant or per-sample field disagrees with the genotype tensor.
    #[error("Length mismatch for {field}: expected {expected}, found {found}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    /// The same sample identifier appears twice.
    #[error("Duplicate sample identifier: {0}")]
    DuplicateSample(String),

    /// The genotype tensor has a zero-length ploidy axis.
    #[error("Genotype tensor has no ploidy slots")]
    EmptyPloidy,

    /// Nested genotype lists are not rectangular.
    #[error("Ragged genotype data at variant {variant}: {detail}")]
    RaggedGenotypes { variant: usize, detail: String },
}

/// A requested sample group refers to samples the callset does not contain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The first identifier (in request order) that could not be resolved.
    #[error("Unknown sample identifier: {0}")]
    UnknownSample(String),
}

/// Failure inside a statistic computation for one unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComputationError {
    /// An index into the genotype tensor is outside its shape.
    #[error("{axis} index {index} out of bounds (len = {len})")]
    IndexOutOfBounds {
        axis: &'static str,
        index: usize,
        len: usize,
    },

    /// Two inputs that must describe the same variants have different lengths.
    #[error("Shape mismatch: {left} vs {right} variants")]
    ShapeMismatch { left: usize, right: usize },

    /// Expected heterozygosity was requested with a zero ploidy term.
    #[error("Invalid ploidy: {0} (must be at least 1)")]
    InvalidPloidy(usize),
}

/// A contig weight that cannot take part in a weighted mean.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightError {
    #[error("Invalid weight for contig '{contig}': {weight} (must be positive and finite)")]
    InvalidWeight { contig: String, weight: f64 },
}

/// Umbrella error for callers that drive a whole analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Callset(#[from] CallsetError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Computation(#[from] ComputationError),

    #[error(transparent)]
    Weight(#[from] WeightError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
