use std::collections::HashSet;
use std::sync::Arc;

use nameres_core::ids::uuid_for;
use nameres_core::traits::{FuzzyMatcher, NameParser};
use nameres_core::types::{Candidate, MatchKind, ParsedName, Response, SourceFilter};
use nameres_index::CanonicalIndex;
use nameres_resolve::Resolver;

/// Canonizes trivially: the trimmed input is the canonical.
struct TrivialParser;

impl NameParser for TrivialParser {
    fn parse(&self, raw: &str) -> ParsedName {
        let verbatim = raw.trim();
        let canonical = if verbatim.is_empty() { None } else { Some(verbatim.to_string()) };
        ParsedName { input_uuid: uuid_for(verbatim), verbatim: verbatim.to_string(), canonical }
    }
}

struct NoMatches;

impl FuzzyMatcher for NoMatches {
    fn find_matches(&self, _term: &str, _filter: &SourceFilter) -> anyhow::Result<Vec<Candidate>> {
        Ok(Vec::new())
    }
}

/// Returns the same canned candidate list for every probe.
struct Canned(Vec<Candidate>);

impl FuzzyMatcher for Canned {
    fn find_matches(&self, _term: &str, _filter: &SourceFilter) -> anyhow::Result<Vec<Candidate>> {
        Ok(self.0.clone())
    }
}

struct Failing;

impl FuzzyMatcher for Failing {
    fn find_matches(&self, term: &str, _filter: &SourceFilter) -> anyhow::Result<Vec<Candidate>> {
        anyhow::bail!("fuzzy backend unavailable for '{term}'")
    }
}

fn fixture_index() -> Arc<CanonicalIndex> {
    Arc::new(CanonicalIndex::from_entries([
        ("Homo sapiens".to_string(), 1),
        ("Homo".to_string(), 1),
        ("Homo".to_string(), 2),
        ("Felis catus".to_string(), 3),
    ]))
}

fn resolver(matcher: impl FuzzyMatcher + 'static) -> Resolver {
    Resolver::new(fixture_index(), Box::new(matcher), Box::new(TrivialParser))
}

fn candidate(term: &str, stem: u32, verbatim: u32) -> Candidate {
    Candidate {
        term: term.to_string(),
        stem_edit_distance: Some(stem),
        verbatim_edit_distance: Some(verbatim),
    }
}

fn names(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn single(responses: &[Response]) -> &Response {
    assert_eq!(responses.len(), 1);
    &responses[0]
}

#[test]
fn exact_hit_in_advanced_mode() {
    let responses = resolver(NoMatches).resolve(&names(&["Homo sapiens"]), &[], true).unwrap();
    let response = single(&responses);
    assert_eq!(response.input_uuid, uuid_for("Homo sapiens"));
    assert_eq!(response.results.len(), 1);
    let result = &response.results[0];
    assert_eq!(result.name_matched.value, "Homo sapiens");
    assert_eq!(result.name_matched.uuid, uuid_for("Homo sapiens"));
    assert_eq!(
        result.match_kind,
        MatchKind::Canonical { partial: false, stem_edit_distance: 0, verbatim_edit_distance: 0 }
    );
}

#[test]
fn exact_hit_is_suppressed_without_advanced() {
    let responses = resolver(NoMatches).resolve(&names(&["Homo sapiens"]), &[], false).unwrap();
    assert!(single(&responses).results.is_empty());
}

#[test]
fn unknown_trinomial_shortens_to_partial_exact_hit() {
    let responses =
        resolver(NoMatches).resolve(&names(&["Homo sapiens fooensis"]), &[], true).unwrap();
    let response = single(&responses);
    assert_eq!(response.input_uuid, uuid_for("Homo sapiens fooensis"));
    let result = &response.results[0];
    assert_eq!(result.name_matched.value, "Homo sapiens");
    assert_eq!(
        result.match_kind,
        MatchKind::Canonical { partial: true, stem_edit_distance: 0, verbatim_edit_distance: 0 }
    );
}

#[test]
fn unknown_trinomial_stays_empty_without_advanced() {
    let responses =
        resolver(NoMatches).resolve(&names(&["Homo sapiens fooensis"]), &[], false).unwrap();
    assert!(single(&responses).results.is_empty());
}

#[test]
fn original_uninomial_hits_with_partial_false() {
    let responses = resolver(NoMatches).resolve(&names(&["Homo"]), &[], true).unwrap();
    let result = &single(&responses).results[0];
    assert_eq!(result.name_matched.value, "Homo");
    assert_eq!(
        result.match_kind,
        MatchKind::Canonical { partial: false, stem_edit_distance: 0, verbatim_edit_distance: 0 }
    );
}

#[test]
fn filter_excluding_all_sources_yields_empty_response() {
    let responses = resolver(NoMatches).resolve(&names(&["Homo sapiens"]), &[3], true).unwrap();
    assert!(single(&responses).results.is_empty());
}

#[test]
fn fuzzy_candidates_carry_their_distances() {
    let matcher = Canned(vec![candidate("Homo sapiens", 5, 6)]);
    let responses = resolver(matcher).resolve(&names(&["Xyz qqq"]), &[], true).unwrap();
    let response = single(&responses);
    assert_eq!(response.input_uuid, uuid_for("Xyz qqq"));
    let result = &response.results[0];
    assert_eq!(result.name_matched.value, "Homo sapiens");
    assert_eq!(
        result.match_kind,
        MatchKind::Canonical { partial: false, stem_edit_distance: 5, verbatim_edit_distance: 6 }
    );
}

#[test]
fn genus_fallback_emits_partial_false() {
    // "Homo sapiens" under a filter matching only the genus entry: the exact
    // tier misses, fuzzy has nothing, shortening reaches "Homo" which is in
    // source 2. The wire contract reports partial = false for this tier even
    // though the split was shortened.
    let responses = resolver(NoMatches).resolve(&names(&["Homo sapiens"]), &[2], true).unwrap();
    let result = &single(&responses).results[0];
    assert_eq!(result.name_matched.value, "Homo");
    assert_eq!(
        result.match_kind,
        MatchKind::Canonical { partial: false, stem_edit_distance: 0, verbatim_edit_distance: 0 }
    );
}

#[test]
fn every_input_gets_exactly_one_response() {
    let inputs = names(&["Homo sapiens", "Homo", "Felis catus", "Nonexistent thing", "", "Homo sapiens fooensis"]);
    let responses = resolver(NoMatches).resolve(&inputs, &[], true).unwrap();
    assert_eq!(responses.len(), inputs.len());
    let distinct: HashSet<_> = responses.iter().map(|r| r.input_uuid).collect();
    assert_eq!(distinct.len(), inputs.len());
    for input in &inputs {
        let uuid = uuid_for(input.trim());
        assert!(responses.iter().any(|r| r.input_uuid == uuid), "missing response for '{input}'");
    }
}

#[test]
fn unparseable_input_yields_empty_response() {
    let responses = resolver(NoMatches).resolve(&names(&[""]), &[], true).unwrap();
    assert!(single(&responses).results.is_empty());
}

#[test]
fn matched_uuids_always_derive_from_the_term() {
    let matcher = Canned(vec![candidate("Homo sapiens", 1, 2), candidate("Felis catus", 3, 4)]);
    let inputs = names(&["Qqq zzz", "Homo", "Homo sapiens fooensis"]);
    let responses = resolver(matcher).resolve(&inputs, &[], true).unwrap();
    for response in &responses {
        for result in &response.results {
            assert_eq!(result.name_matched.uuid, uuid_for(&result.name_matched.value));
        }
    }
}

#[test]
fn candidate_order_is_preserved() {
    let matcher = Canned(vec![
        candidate("Felis catus", 9, 9),
        candidate("Homo sapiens", 1, 1),
        candidate("Homo", 2, 2),
    ]);
    let responses = resolver(matcher).resolve(&names(&["Qqq zzz"]), &[], true).unwrap();
    let values: Vec<_> =
        single(&responses).results.iter().map(|r| r.name_matched.value.as_str()).collect();
    assert_eq!(values, vec!["Felis catus", "Homo sapiens", "Homo"]);
}

#[test]
fn filter_drops_individual_candidates_but_keeps_the_rest() {
    let matcher = Canned(vec![candidate("Felis catus", 2, 2), candidate("Homo sapiens", 1, 1)]);
    let responses = resolver(matcher).resolve(&names(&["Qqq zzz"]), &[3], true).unwrap();
    let response = single(&responses);
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].name_matched.value, "Felis catus");
}

#[test]
fn no_zero_distance_results_without_advanced() {
    let matcher = Canned(vec![candidate("Homo sapiens", 0, 3), candidate("Felis catus", 0, 0)]);
    let inputs = names(&["Qqq zzz", "Homo sapiens", "Homo"]);
    let responses = resolver(matcher).resolve(&inputs, &[], false).unwrap();
    assert_eq!(responses.len(), inputs.len());
    for response in &responses {
        for result in &response.results {
            match &result.match_kind {
                MatchKind::Canonical { stem_edit_distance, verbatim_edit_distance, .. } => {
                    assert!(*stem_edit_distance > 0 || *verbatim_edit_distance > 0)
                }
                other => panic!("unexpected match kind {other:?}"),
            }
        }
    }
}

#[test]
fn missing_candidate_distances_default_to_zero() {
    let matcher = Canned(vec![Candidate {
        term: "Homo sapiens".to_string(),
        stem_edit_distance: None,
        verbatim_edit_distance: None,
    }]);
    let responses = resolver(matcher).resolve(&names(&["Qqq zzz"]), &[], true).unwrap();
    let result = &single(&responses).results[0];
    assert_eq!(
        result.match_kind,
        MatchKind::Canonical { partial: false, stem_edit_distance: 0, verbatim_edit_distance: 0 }
    );
}

#[test]
fn fuzzy_probe_failure_propagates() {
    let err = resolver(Failing).resolve(&names(&["Qqq zzz"]), &[], true).unwrap_err();
    assert!(err.to_string().contains("fuzzy backend unavailable"));
}

#[test]
fn exhausted_shortening_terminates_with_empty_response() {
    // An unknown uninomial shortens to the empty partial, which can only miss.
    let responses = resolver(NoMatches).resolve(&names(&["Zzzz"]), &[], true).unwrap();
    assert!(single(&responses).results.is_empty());
}
