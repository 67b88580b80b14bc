//! JSON interchange form of a callset.
//!
//! The statistics never read files themselves; whatever loads a VCF hands over
//! a [`CallsetDocument`] (or builds a [`Callset`] directly). Genotypes are
//! nested lists `[variant][sample][slot]` with negative values for missing
//! calls, e.g. `./.` becomes `[-1, -1]`.

use crate::callset::Callset;
use crate::errors::{AnalysisError, CallsetError};
use ndarray::Array3;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Ploidy assumed for a document that contains no variants.
const DEFAULT_PLOIDY: usize = 2;

/// Serializable snapshot of a [`Callset`]. Every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallsetDocument {
    pub samples: Vec<String>,
    pub positions: Vec<i64>,
    pub contigs: Vec<String>,
    pub genotypes: Vec<Vec<Vec<i8>>>,
}

impl CallsetDocument {
    /// Parse a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse a document from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    /// Parse and validate in one step.
    pub fn load<R: Read>(reader: R) -> Result<Callset, AnalysisError> {
        let document = Self::from_reader(reader)?;
        Ok(Callset::try_from(document)?)
    }
}

impl TryFrom<CallsetDocument> for Callset {
    type Error = CallsetError;

    fn try_from(doc: CallsetDocument) -> Result<Self, Self::Error> {
        let n_variants = doc.genotypes.len();
        let n_samples = doc.samples.len();
        let ploidy = doc
            .genotypes
            .first()
            .and_then(|row| row.first())
            .map_or(DEFAULT_PLOIDY, Vec::len);

        let mut flat = Vec::with_capacity(n_variants * n_samples * ploidy);
        for (variant, row) in doc.genotypes.into_iter().enumerate() {
            if row.len() != n_samples {
                return Err(CallsetError::RaggedGenotypes {
                    variant,
                    detail: format!("expected {n_samples} calls, found {}", row.len()),
                });
            }
            for call in row {
                if call.len() != ploidy {
                    return Err(CallsetError::RaggedGenotypes {
                        variant,
                        detail: format!("expected {ploidy} alleles per call, found {}", call.len()),
                    });
                }
                flat.extend(call);
            }
        }

        let genotypes = Array3::from_shape_vec((n_variants, n_samples, ploidy), flat).map_err(
            |e| CallsetError::RaggedGenotypes {
                variant: 0,
                detail: e.to_string(),
            },
        )?;

        Callset::new(doc.samples, doc.positions, doc.contigs, genotypes)
    }
}

impl From<&Callset> for CallsetDocument {
    fn from(callset: &Callset) -> Self {
        let genotypes: Vec<Vec<Vec<i8>>> = callset
            .genotypes()
            .outer_iter()
            .map(|variant| {
                variant
                    .outer_iter()
                    .map(|call| call.to_vec())
                    .collect::<Vec<_>>()
            })
            .collect();

        Self {
            samples: callset.samples().to_vec(),
            positions: callset.positions().to_vec(),
            contigs: callset.contigs().to_vec(),
            genotypes,
        }
    }
}
