//! Default fuzzy matcher over the canonical index.
//!
//! Two-stage approach:
//! 1. tantivy `FuzzyTermQuery` (Levenshtein automaton) - candidate retrieval
//!    over the canonical strings indexed as raw terms
//! 2. strsim - exact verbatim and stem edit distances on the candidates
//!
//! Candidates are source-filtered and returned in ascending verbatim-distance
//! order; ties break on the term so the order is deterministic.

use anyhow::Result;
use std::sync::Arc;
use tantivy::collector::TopDocs;
use tantivy::query::FuzzyTermQuery;
use tantivy::schema::{Schema, Value, STORED, STRING};
use tantivy::{doc, Index, TantivyDocument, Term};
use tracing::debug;

use nameres_core::traits::FuzzyMatcher;
use nameres_core::types::{Candidate, SourceFilter};

use crate::index::CanonicalIndex;
use crate::stem::stem_name;

/// Levenshtein automata are only built for distances 0..=2.
const MAX_SUPPORTED_DISTANCE: u8 = 2;

const DEFAULT_MAX_DISTANCE: u8 = 2;
const DEFAULT_CANDIDATE_LIMIT: usize = 10;

pub struct LevenshteinMatcher {
    searcher: tantivy::Searcher,
    name_field: tantivy::schema::Field,
    canonicals: Arc<CanonicalIndex>,
    max_distance: u8,
    candidate_limit: usize,
}

impl LevenshteinMatcher {
    pub fn new(canonicals: Arc<CanonicalIndex>) -> Result<Self> {
        Self::with_limits(canonicals, DEFAULT_MAX_DISTANCE, DEFAULT_CANDIDATE_LIMIT)
    }

    /// Build the in-RAM term index over every canonical name.
    pub fn with_limits(
        canonicals: Arc<CanonicalIndex>,
        max_distance: u8,
        candidate_limit: usize,
    ) -> Result<Self> {
        anyhow::ensure!(
            max_distance <= MAX_SUPPORTED_DISTANCE,
            "max_distance must be 0..=2, got {}",
            max_distance
        );
        let mut schema_builder = Schema::builder();
        let name_field = schema_builder.add_text_field("name", STRING | STORED);
        let index = Index::create_in_ram(schema_builder.build());
        let mut index_writer = index.writer(50_000_000)?;
        for name in canonicals.names() {
            index_writer.add_document(doc!(name_field => name))?;
        }
        index_writer.commit()?;
        let reader = index.reader()?;
        let searcher = reader.searcher();
        Ok(Self { searcher, name_field, canonicals, max_distance, candidate_limit })
    }
}

impl FuzzyMatcher for LevenshteinMatcher {
    fn find_matches(&self, term: &str, filter: &SourceFilter) -> Result<Vec<Candidate>> {
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let query = FuzzyTermQuery::new(
            Term::from_field_text(self.name_field, term),
            self.max_distance,
            true,
        );
        let top_docs = self.searcher.search(&query, &TopDocs::with_limit(self.candidate_limit))?;

        let term_stem = stem_name(term);
        let mut candidates = Vec::new();
        for (_score, addr) in top_docs {
            let doc: TantivyDocument = self.searcher.doc(addr)?;
            let matched = doc.get_first(self.name_field).and_then(|v| v.as_str()).unwrap_or("");
            if matched.is_empty() || !self.canonicals.intersects(matched, filter) {
                continue;
            }
            let verbatim = strsim::levenshtein(term, matched) as u32;
            let stem = strsim::levenshtein(&term_stem, &stem_name(matched)) as u32;
            candidates.push(Candidate {
                term: matched.to_string(),
                stem_edit_distance: Some(stem),
                verbatim_edit_distance: Some(verbatim),
            });
        }
        candidates.sort_by(|a, b| {
            (a.verbatim_edit_distance, &a.term).cmp(&(b.verbatim_edit_distance, &b.term))
        });
        debug!(term, found = candidates.len(), "fuzzy lookup");
        Ok(candidates)
    }
}
