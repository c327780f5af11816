//! nameres-index
//!
//! The canonical-name reference index: exact membership with data-source
//! tags (`index`), latin suffix stemming (`stem`), and the default fuzzy
//! matcher built on tantivy's Levenshtein automata (`fuzzy`).

pub mod fuzzy;
pub mod index;
pub mod stem;

pub use fuzzy::LevenshteinMatcher;
pub use index::CanonicalIndex;
