//! Response construction.
//!
//! All wire results are minted here so the two invariants hold in one place:
//! `name_matched.uuid == uuid_for(name_matched.value)`, and the `partial`
//! flag mirrors whether the split had been shortened when the result was
//! produced (with the deliberate genus-fallback exception below).

use nameres_core::ids::uuid_for;
use nameres_core::types::{
    Candidate, MatchKind, MatchedName, NameSplit, ParsedName, ResolvedResult, Response,
};

fn result_for(term: &str, match_kind: MatchKind) -> ResolvedResult {
    ResolvedResult {
        name_matched: MatchedName { uuid: uuid_for(term), value: term.to_string() },
        match_kind,
    }
}

/// No match: the input is answered, the results are empty.
pub fn empty(parsed: &ParsedName) -> Response {
    Response { input_uuid: parsed.input_uuid, results: Vec::new() }
}

/// Exact hit on the working partial; partial flag records shortening history.
pub fn exact(split: &NameSplit) -> Response {
    let kind = MatchKind::Canonical {
        partial: !split.is_original,
        stem_edit_distance: 0,
        verbatim_edit_distance: 0,
    };
    Response {
        input_uuid: split.parsed.input_uuid,
        results: vec![result_for(&split.partial, kind)],
    }
}

/// Degraded genus hit after shortening down to a single word. The wire
/// contract reports `partial = false` here even though the split was
/// shortened; consumers rely on the flag reading false for this tier.
pub fn genus_fallback(split: &NameSplit) -> Response {
    Response {
        input_uuid: split.parsed.input_uuid,
        results: vec![result_for(&split.partial, MatchKind::default())],
    }
}

/// One result per surviving candidate, in the order the matcher returned
/// them. Missing distances collapse to 0 on the wire.
pub fn fuzzy(split: &NameSplit, candidates: &[Candidate]) -> Response {
    let results = candidates
        .iter()
        .map(|c| {
            let kind = MatchKind::Canonical {
                partial: !split.is_original,
                stem_edit_distance: c.stem_edit_distance.unwrap_or(0),
                verbatim_edit_distance: c.verbatim_edit_distance.unwrap_or(0),
            };
            result_for(&c.term, kind)
        })
        .collect();
    Response { input_uuid: split.parsed.input_uuid, results }
}
