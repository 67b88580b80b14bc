//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use sumstats::prelude::*;
//!
//! let callset = CallsetDocument::from_json(
//!     r#"{"samples": ["S1", "S2"], "positions": [10],
//!         "contigs": ["chr1"], "genotypes": [[[0, 1], [0, 0]]]}"#,
//! )
//! .unwrap();
//! let callset = Callset::try_from(callset).unwrap();
//!
//! let engine = DiversityEngine::new(&callset, AnalysisConfig::default());
//! let report = engine.compute(Statistic::NucleotideDiversity, None);
//! assert!(report.is_complete());
//! ```

pub use sumstats_core::prelude::*;

pub use sumstats_analysis::analysis::{
    aggregate, heterozygosity_profile, weighted_mean, AnalysisConfig, ContigValues,
    DiversityEngine, DiversityReport, Partitioner, StatValue, Statistic, StatisticResult,
    UnitError, UnitFailure, UnweightedPolicy,
};
