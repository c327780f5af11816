//! Fuzzy probing of splits that missed exact lookup.

use anyhow::Result;
use tracing::debug;

use nameres_core::traits::FuzzyMatcher;
use nameres_core::types::{Candidate, NameSplit, SourceFilter};
use nameres_index::CanonicalIndex;

pub struct ProbeOutcome {
    /// Splits with at least one candidate surviving the source filter,
    /// candidate order as returned by the matcher.
    pub with_candidates: Vec<(NameSplit, Vec<Candidate>)>,
    /// Splits the matcher could not help with under the filter.
    pub empty: Vec<NameSplit>,
}

/// A candidate is usable when the filter is empty, or when its term shares a
/// data source with the filter.
pub fn survives(index: &CanonicalIndex, term: &str, filter: &SourceFilter) -> bool {
    filter.is_empty() || index.intersects(term, filter)
}

pub fn probe(
    matcher: &dyn FuzzyMatcher,
    index: &CanonicalIndex,
    queue: Vec<NameSplit>,
    filter: &SourceFilter,
) -> Result<ProbeOutcome> {
    let mut with_candidates = Vec::new();
    let mut empty = Vec::new();
    for split in queue {
        let candidates = matcher.find_matches(&split.partial, filter)?;
        debug!(partial = %split.partial, candidates = candidates.len(), "fuzzy probe");
        if candidates.iter().any(|c| survives(index, &c.term, filter)) {
            with_candidates.push((split, candidates));
        } else {
            empty.push(split);
        }
    }
    Ok(ProbeOutcome { with_candidates, empty })
}
