//! Commonly used imports for convenience.
//!
//! ```
//! use sumstats_core::prelude::*;
//!
//! let weights = ContigWeights::new([("chr1", 248.9), ("chr2", 242.2)]).unwrap();
//! assert_eq!(weights.len(), 2);
//! ```

pub use crate::callset::Callset;
pub use crate::document::CallsetDocument;
pub use crate::errors::{
    self, AnalysisError, CallsetError, ComputationError, ValidationError, WeightError,
};
pub use crate::groups::{CladeMap, ContigWeights};
