//! Immutable canonical-name → data-source-set mapping.

use anyhow::Result;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::OnceLock;
use tracing::info;

use nameres_core::error::Error;
use nameres_core::types::{DataSourceId, SourceFilter};

fn empty_sources() -> &'static HashSet<DataSourceId> {
    static EMPTY: OnceLock<HashSet<DataSourceId>> = OnceLock::new();
    EMPTY.get_or_init(HashSet::new)
}

/// Read-only index of known canonical names, each tagged with the data
/// sources containing it. Constructed once at startup; never mutated during
/// resolution, so it is freely shareable across threads.
#[derive(Debug)]
pub struct CanonicalIndex {
    entries: HashMap<String, HashSet<DataSourceId>>,
}

impl CanonicalIndex {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, DataSourceId)>,
    {
        let mut map: HashMap<String, HashSet<DataSourceId>> = HashMap::new();
        for (name, source) in entries {
            map.entry(name).or_default().insert(source);
        }
        Self { entries: map }
    }

    /// Load `canonical \t source_id` lines. Blank lines and `#` comments are
    /// skipped; anything else that does not parse is an error carrying the
    /// line number.
    pub fn load_tsv(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut map: HashMap<String, HashSet<DataSourceId>> = HashMap::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (name, source) = line.split_once('\t').ok_or(Error::InvalidRecord {
                line: number + 1,
                reason: "expected 'canonical<TAB>source_id'".to_string(),
            })?;
            let source: DataSourceId = source.trim().parse().map_err(|_| Error::InvalidRecord {
                line: number + 1,
                reason: format!("source id '{}' is not an integer", source.trim()),
            })?;
            map.entry(name.trim().to_string()).or_default().insert(source);
        }
        info!(count = map.len(), path = %path.display(), "loaded canonical index");
        Ok(Self { entries: map })
    }

    /// Total lookup: unknown names return the empty set.
    pub fn lookup(&self, name: &str) -> &HashSet<DataSourceId> {
        self.entries.get(name).unwrap_or_else(|| empty_sources())
    }

    /// With an empty filter, any indexed source counts; otherwise the entry
    /// must share at least one source with the filter.
    pub fn intersects(&self, name: &str, filter: &SourceFilter) -> bool {
        let sources = self.lookup(name);
        if filter.is_empty() {
            !sources.is_empty()
        } else {
            sources.iter().any(|s| filter.contains(s))
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct data sources across all entries.
    pub fn source_count(&self) -> usize {
        let mut sources: HashSet<DataSourceId> = HashSet::new();
        for entry in self.entries.values() {
            sources.extend(entry);
        }
        sources.len()
    }
}
