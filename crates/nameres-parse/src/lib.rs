//! nameres-parse
//!
//! Default scientific-name parser: derives the deterministic input UUID from
//! the verbatim string and extracts a canonical form (genus plus lowercase
//! epithets, authorship and years stripped). Anything it cannot read as a
//! name canonizes to `None`.

use nameres_core::ids::uuid_for;
use nameres_core::traits::NameParser;
use nameres_core::types::ParsedName;

/// Rank markers are dropped from the canonical; the epithet that follows is kept.
const RANK_MARKERS: &[&str] = &["var.", "subsp.", "ssp.", "f.", "fo.", "subvar."];

#[derive(Debug, Default)]
pub struct CanonicalParser;

impl CanonicalParser {
    pub fn new() -> Self {
        Self
    }
}

impl NameParser for CanonicalParser {
    fn parse(&self, raw: &str) -> ParsedName {
        let verbatim = raw.trim();
        ParsedName {
            input_uuid: uuid_for(verbatim),
            verbatim: verbatim.to_string(),
            canonical: canonicalize(verbatim),
        }
    }
}

/// First token must look like a genus (capitalized, alphabetic). Subsequent
/// lowercase alphabetic tokens are epithets; the first authorship-looking
/// token (capitalized, parenthesized, or containing digits) ends the name.
fn canonicalize(raw: &str) -> Option<String> {
    let mut words: Vec<&str> = Vec::new();
    for token in raw.split_whitespace() {
        let token = token.strip_prefix('×').unwrap_or(token);
        if token.is_empty() {
            continue;
        }
        if words.is_empty() {
            if !is_genus(token) {
                return None;
            }
            words.push(token);
            continue;
        }
        if RANK_MARKERS.contains(&token) {
            continue;
        }
        if is_epithet(token) {
            words.push(token);
            continue;
        }
        break;
    }
    if words.is_empty() { None } else { Some(words.join(" ")) }
}

fn is_genus(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase())
}

fn is_epithet(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_lowercase() || c == '-')
}
