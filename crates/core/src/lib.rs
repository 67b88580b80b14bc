//! # Core Crate
//!
//! The `core` crate holds the data model shared by the statistics engine and
//! the command-line tool: the in-memory callset, named sample groups, contig
//! weights, the JSON interchange documents and the error taxonomy.

pub mod callset;
pub mod document;
pub mod errors;
pub mod groups;
pub mod prelude;

pub use callset::Callset;
pub use document::CallsetDocument;
pub use groups::{CladeMap, ContigWeights};
