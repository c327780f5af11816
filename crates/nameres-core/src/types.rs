use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

pub type DataSourceId = i32;
pub type SourceFilter = HashSet<DataSourceId>;

/// Parser output: the input identity plus an optional canonical form.
#[derive(Debug, Clone)]
pub struct ParsedName {
    pub input_uuid: Uuid,
    pub verbatim: String,
    pub canonical: Option<String>,
}

impl ParsedName {
    /// The canonical form, or `None` when parsing failed or produced nothing.
    pub fn canonized(&self) -> Option<&str> {
        self.canonical.as_deref().filter(|c| !c.is_empty())
    }
}

/// A parsed name together with the canonical substring currently under
/// consideration. `is_original` is true until the first `shorten`.
#[derive(Debug, Clone)]
pub struct NameSplit {
    pub parsed: ParsedName,
    pub partial: String,
    pub is_original: bool,
}

impl NameSplit {
    pub fn from_parsed(parsed: ParsedName) -> Self {
        let partial = parsed.canonized().unwrap_or_default().to_string();
        Self { parsed, partial, is_original: true }
    }

    /// Word count of the working partial; 0 when it is empty.
    pub fn size(&self) -> usize {
        if self.partial.is_empty() {
            0
        } else {
            self.partial.bytes().filter(|b| *b == b' ').count() + 1
        }
    }

    pub fn is_uninomial(&self) -> bool {
        self.size() == 1
    }

    /// Drop the final space-separated token. Pure; the receiver is unchanged.
    pub fn shorten(&self) -> Self {
        let partial = match self.partial.rfind(' ') {
            Some(cut) if self.size() > 1 => self.partial[..cut].to_string(),
            _ => String::new(),
        };
        Self { parsed: self.parsed.clone(), partial, is_original: false }
    }
}

/// One approximate match reported by a fuzzy matcher. Missing distances
/// serialize as 0 once converted to a wire result.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub term: String,
    pub stem_edit_distance: Option<u32>,
    pub verbatim_edit_distance: Option<u32>,
}

/// A matched canonical name on the wire; `uuid` is always `ids::uuid_for(value)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedName {
    pub uuid: Uuid,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchKind {
    Canonical {
        #[serde(default)]
        partial: bool,
        #[serde(default)]
        stem_edit_distance: u32,
        #[serde(default)]
        verbatim_edit_distance: u32,
    },
    /// Verbatim-string match from the broader protocol; never produced here.
    ExactName,
    /// Placeholder from the broader protocol; never produced here.
    Unknown,
}

impl Default for MatchKind {
    fn default() -> Self {
        MatchKind::Canonical { partial: false, stem_edit_distance: 0, verbatim_edit_distance: 0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedResult {
    pub name_matched: MatchedName,
    pub match_kind: MatchKind,
}

/// Exactly one `Response` is produced per input name; an absent or weak match
/// is an empty `results` vector, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub input_uuid: Uuid,
    pub results: Vec<ResolvedResult>,
}
