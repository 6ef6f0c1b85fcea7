//! Part-of-speech normalization for Kaikki extracts.
//!
//! Wiktionary part-of-speech names vary between editions ("noun", "name",
//! "proper noun", ...). A [`PosTable`] maps each known alias onto one short
//! canonical tag. Tags the table does not know are passed through unchanged
//! and counted in [`SkippedPos`] so the caller can report them once the run
//! is over.
//!
//! # Table format
//! A JSON array of alias groups. The first entry of a group is the canonical
//! tag for every alias in it:
//!
//! ```json
//! [["n", "noun", "name"], ["v", "verb"], ["adj", "adjective"]]
//! ```
//!
//! # Example
//! ```no_run
//! use kaikki_pos::{PosTable, SkippedPos};
//!
//! # fn main() -> anyhow::Result<()> {
//! let table = PosTable::load("data/language/target-language-tags/en/parts_of_speech.json")?;
//! let mut skipped = SkippedPos::default();
//! assert_eq!(table.normalize("noun", &mut skipped), "n");
//! for (tag, count) in skipped.sorted() {
//!     println!("{tag}: {count}");
//! }
//! # Ok(()) }
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Alias lookup from source part-of-speech tags to canonical tags.
#[derive(Clone, Debug, Default)]
pub struct PosTable {
    aliases: HashMap<String, String>,
}

impl PosTable {
    /// Load an alias table from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("open part-of-speech table {}", path.display()))?;
        let groups: Vec<Vec<String>> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parse part-of-speech table {}", path.display()))?;
        Self::from_groups(groups).with_context(|| format!("load {}", path.display()))
    }

    /// Build a table from alias groups whose first entry is the canonical tag.
    ///
    /// When an alias appears in several groups the earliest group wins.
    pub fn from_groups<I, G, S>(groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut aliases = HashMap::new();
        for (idx, group) in groups.into_iter().enumerate() {
            let group: Vec<String> = group.into_iter().map(Into::into).collect();
            let Some(canonical) = group.first().cloned() else {
                bail!("part-of-speech group {idx} is empty");
            };
            for alias in group {
                aliases.entry(alias).or_insert_with(|| canonical.clone());
            }
        }
        Ok(Self { aliases })
    }

    /// Canonical tag for `tag`, if the table knows it.
    pub fn lookup(&self, tag: &str) -> Option<&str> {
        self.aliases.get(tag).map(String::as_str)
    }

    /// Canonical tag for `tag`, or `tag` itself when unmapped.
    ///
    /// Unmapped tags are counted in `skipped`.
    pub fn normalize(&self, tag: &str, skipped: &mut SkippedPos) -> String {
        match self.lookup(tag) {
            Some(canonical) => canonical.to_string(),
            None => {
                skipped.record(tag);
                tag.to_string()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Occurrence counts of part-of-speech tags missing from a [`PosTable`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SkippedPos {
    counts: HashMap<String, usize>,
}

impl SkippedPos {
    pub fn record(&mut self, tag: &str) {
        *self.counts.entry(tag.to_string()).or_insert(0) += 1;
    }

    pub fn count(&self, tag: &str) -> usize {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    /// Number of distinct unmapped tags.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total unmapped occurrences across all tags.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Tags ordered by descending count, ties broken alphabetically.
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut out: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(tag, count)| (tag.as_str(), *count))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        out
    }
}
