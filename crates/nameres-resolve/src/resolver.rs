//! The recursive resolver.

use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use nameres_core::traits::{FuzzyMatcher, NameParser};
use nameres_core::types::{DataSourceId, MatchKind, NameSplit, Response, SourceFilter};
use nameres_index::CanonicalIndex;

use crate::classify::{classify, Classified};
use crate::probe::{probe, survives, ProbeOutcome};
use crate::response;

/// Resolves raw name strings against the canonical index, degrading from
/// exact lookup through fuzzy lookup to suffix-shortened retries.
///
/// Read-only after construction; independent `resolve` calls may run in
/// parallel.
pub struct Resolver {
    index: Arc<CanonicalIndex>,
    matcher: Box<dyn FuzzyMatcher>,
    parser: Box<dyn NameParser>,
}

impl Resolver {
    pub fn new(
        index: Arc<CanonicalIndex>,
        matcher: Box<dyn FuzzyMatcher>,
        parser: Box<dyn NameParser>,
    ) -> Self {
        Self { index, matcher, parser }
    }

    /// Resolve a batch. Every input yields exactly one `Response`; response
    /// order is not the input order, join by `input_uuid`.
    ///
    /// `advanced` enables the shortening recursion and keeps exact results in
    /// the output; without it, only results with a positive edit distance
    /// survive.
    pub fn resolve(
        &self,
        names: &[String],
        data_source_ids: &[DataSourceId],
        advanced: bool,
    ) -> Result<Vec<Response>> {
        let filter: SourceFilter = data_source_ids.iter().copied().collect();
        let mut responses = Vec::with_capacity(names.len());
        let mut splits = Vec::new();
        for raw in names {
            let parsed = self.parser.parse(raw);
            if parsed.canonized().is_some() {
                splits.push(NameSplit::from_parsed(parsed));
            } else {
                responses.push(response::empty(&parsed));
            }
        }
        responses.extend(self.resolve_from_partials(splits, &filter, advanced)?);
        if !advanced {
            strip_exact_results(&mut responses);
        }
        Ok(responses)
    }

    /// One level of the recursion: classify, answer hits, probe the misses,
    /// shorten and recurse on whatever is still empty.
    fn resolve_from_partials(
        &self,
        batch: Vec<NameSplit>,
        filter: &SourceFilter,
        advanced: bool,
    ) -> Result<Vec<Response>> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }
        let total = batch.len();
        let Classified { genus_only, exact_hit, fuzzy_queue } =
            classify(batch, &self.index, filter);
        debug!(
            total,
            genus_only = genus_only.len(),
            exact_hit = exact_hit.len(),
            fuzzy_queue = fuzzy_queue.len(),
            "classified resolution level"
        );

        let mut responses = Vec::with_capacity(total);
        for split in &genus_only {
            if self.index.intersects(&split.partial, filter) {
                responses.push(response::genus_fallback(split));
            } else {
                responses.push(response::empty(&split.parsed));
            }
        }
        for split in &exact_hit {
            responses.push(response::exact(split));
        }

        let ProbeOutcome { with_candidates, empty } =
            probe(self.matcher.as_ref(), &self.index, fuzzy_queue, filter)?;
        for (split, candidates) in &with_candidates {
            let surviving: Vec<_> = candidates
                .iter()
                .filter(|c| survives(&self.index, &c.term, filter))
                .cloned()
                .collect();
            responses.push(response::fuzzy(split, &surviving));
        }

        if advanced {
            let shortened: Vec<NameSplit> = empty.into_iter().map(|s| s.shorten()).collect();
            responses.extend(self.resolve_from_partials(shortened, filter, advanced)?);
        } else {
            for split in &empty {
                responses.push(response::empty(&split.parsed));
            }
        }

        assert_eq!(responses.len(), total, "one response per split at each level");
        Ok(responses)
    }
}

/// Non-advanced callers asked for the fuzzy tier only: drop results whose
/// canonical match carries no edit distance at all.
fn strip_exact_results(responses: &mut [Response]) {
    for resp in responses.iter_mut() {
        resp.results.retain(|r| {
            !matches!(
                r.match_kind,
                MatchKind::Canonical { stem_edit_distance: 0, verbatim_edit_distance: 0, .. }
            )
        });
    }
}
