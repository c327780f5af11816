//! Exact classification of a batch of splits against the canonical index.

use nameres_core::types::{NameSplit, SourceFilter};
use nameres_index::CanonicalIndex;

/// One-pass partition of a batch. Every input split lands in exactly one
/// bucket, so downstream response counts stay aligned with the batch.
pub struct Classified {
    /// Shortened down to a single word (or to nothing). Reported as a
    /// degraded genus match, never sent to fuzzy lookup.
    pub genus_only: Vec<NameSplit>,
    /// Intersects the index under the filter.
    pub exact_hit: Vec<NameSplit>,
    /// Missed exactly; eligible for fuzzy lookup.
    pub fuzzy_queue: Vec<NameSplit>,
}

pub fn classify(batch: Vec<NameSplit>, index: &CanonicalIndex, filter: &SourceFilter) -> Classified {
    let mut genus_only = Vec::new();
    let mut exact_hit = Vec::new();
    let mut fuzzy_queue = Vec::new();
    for split in batch {
        // A shortened uninomial goes to the genus bucket even if it would
        // have hit exactly; an empty partial can only miss there.
        if split.size() == 0 || (split.is_uninomial() && !split.is_original) {
            genus_only.push(split);
        } else if index.intersects(&split.partial, filter) {
            exact_hit.push(split);
        } else {
            fuzzy_queue.push(split);
        }
    }
    Classified { genus_only, exact_hit, fuzzy_queue }
}
