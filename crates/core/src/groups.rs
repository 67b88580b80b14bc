//! Named sample groups and contig weights.
//!
//! Both are plain key-value mappings loaded from JSON by the caller. Clades
//! are kept in a `BTreeMap` so that group iteration, and therefore result
//! assembly, is ordered by label.

use crate::errors::WeightError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Group label to sample identifiers, e.g. `{"cladeA": ["S1", "S4"]}`.
pub type CladeMap = BTreeMap<String, Vec<String>>;

/// Positive weight per contig (typically its physical length).
///
/// Weights are validated on construction and on deserialization, so every
/// stored value is finite and strictly positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct ContigWeights {
    weights: BTreeMap<String, f64>,
}

impl ContigWeights {
    /// Build from `(contig, weight)` pairs. Later duplicates replace earlier ones.
    ///
    /// # Errors
    ///
    /// Returns [`WeightError::InvalidWeight`] for a zero, negative or
    /// non-finite weight.
    pub fn new<I, K>(weights: I) -> Result<Self, WeightError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (contig, weight) in weights {
            let contig = contig.into();
            if !(weight.is_finite() && weight > 0.0) {
                return Err(WeightError::InvalidWeight { contig, weight });
            }
            map.insert(contig, weight);
        }
        Ok(Self { weights: map })
    }

    /// Weight of a contig, `None` if it has none.
    pub fn get(&self, contig: &str) -> Option<f64> {
        self.weights.get(contig).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl TryFrom<BTreeMap<String, f64>> for ContigWeights {
    type Error = WeightError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::new(map)
    }
}

impl From<ContigWeights> for BTreeMap<String, f64> {
    fn from(weights: ContigWeights) -> Self {
        weights.weights
    }
}
