//! Trait surfaces for the resolver's external collaborators.

use crate::types::{Candidate, ParsedName, SourceFilter};

/// Parses a raw name string into its identity and canonical form.
pub trait NameParser: Send + Sync {
    fn parse(&self, raw: &str) -> ParsedName;
}

/// Approximate lookup over the set of known canonical names. The returned
/// order is the matcher's relevance order and is preserved downstream.
pub trait FuzzyMatcher: Send + Sync {
    fn find_matches(&self, term: &str, filter: &SourceFilter) -> anyhow::Result<Vec<Candidate>>;
}
