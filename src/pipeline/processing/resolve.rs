//! Cross-source team resolution.
//!
//! The [`NameDirectory`] is built once from the reference (scoring) source and
//! is read-only afterwards. [`resolve`] tries an exact case-insensitive lookup
//! first, then walks the directory in its stored order and takes the first
//! entry where either name contains the other.
//!
//! The substring fallback is deliberately simple: a short directory name can
//! be contained in several unrelated names, and the first one in directory
//! order wins. Precision is traded for recall here.

use std::collections::HashMap;

use tracing::debug;

use crate::types::{ScoringRecord, TeamId};

/// One directory entry: lower-cased lookup key, the canonical display name
/// from the reference source, and its storage identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub key: String,
    pub name: String,
    pub id: TeamId,
}

/// Ordered lower-cased name → identifier directory.
#[derive(Debug, Clone, Default)]
pub struct NameDirectory {
    entries: Vec<DirectoryEntry>,
    /// Exact-match index into `entries`
    index: HashMap<String, usize>,
}

impl NameDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from persisted scoring records, keeping their order.
    /// Records without an identifier have not been stored and are ignored.
    pub fn from_records(records: &[ScoringRecord]) -> Self {
        let mut directory = Self::new();
        for record in records {
            if let Some(id) = record.id {
                directory.insert(&record.team_name, id);
            }
        }
        directory
    }

    /// Append an entry. A name already present keeps its first identifier.
    pub fn insert(&mut self, name: &str, id: TeamId) -> bool {
        let key = name.trim().to_lowercase();
        if key.is_empty() || self.index.contains_key(&key) {
            debug!("Ignoring duplicate or empty directory name {:?}", name);
            return false;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(DirectoryEntry {
            key,
            name: name.trim().to_string(),
            id,
        });
        true
    }

    pub fn get(&self, name: &str) -> Option<&DirectoryEntry> {
        self.index
            .get(&name.trim().to_lowercase())
            .map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &DirectoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn resolve(&self, name: &str) -> Resolution {
        resolve(name, self)
    }
}

impl<S: AsRef<str>> FromIterator<(S, TeamId)> for NameDirectory {
    fn from_iter<I: IntoIterator<Item = (S, TeamId)>>(iter: I) -> Self {
        let mut directory = Self::new();
        for (name, id) in iter {
            directory.insert(name.as_ref(), id);
        }
        directory
    }
}

/// Which rule produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Substring,
}

/// Outcome of resolving one name against the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched {
        id: TeamId,
        /// The directory's name, used as the resolved canonical name
        name: String,
        kind: MatchKind,
    },
    Unresolved,
}

impl Resolution {
    pub fn team_id(&self) -> Option<TeamId> {
        match self {
            Resolution::Matched { id, .. } => Some(*id),
            Resolution::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Matched { .. })
    }
}

/// Resolve `name` against `directory`.
pub fn resolve(name: &str, directory: &NameDirectory) -> Resolution {
    let needle = name.trim().to_lowercase();
    // "" is a substring of every name.
    if needle.is_empty() {
        return Resolution::Unresolved;
    }

    if let Some(entry) = directory.get(&needle) {
        return Resolution::Matched {
            id: entry.id,
            name: entry.name.clone(),
            kind: MatchKind::Exact,
        };
    }

    directory
        .iter()
        .find(|entry| needle.contains(&entry.key) || entry.key.contains(&needle))
        .map_or(Resolution::Unresolved, |entry| Resolution::Matched {
            id: entry.id,
            name: entry.name.clone(),
            kind: MatchKind::Substring,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let directory: NameDirectory = [("bills", 1), ("patriots", 2)].into_iter().collect();

        assert_eq!(
            resolve("Bills", &directory),
            Resolution::Matched {
                id: 1,
                name: "bills".to_string(),
                kind: MatchKind::Exact
            }
        );
    }

    #[test]
    fn test_substring_fallback_uses_directory_name() {
        let directory: NameDirectory = [("New England Patriots", 2)].into_iter().collect();

        let resolution = resolve("Patriots", &directory);
        assert_eq!(resolution.team_id(), Some(2));
        assert_eq!(
            resolution,
            Resolution::Matched {
                id: 2,
                name: "New England Patriots".to_string(),
                kind: MatchKind::Substring
            }
        );
    }

    #[test]
    fn test_directory_name_contained_in_input() {
        let directory: NameDirectory = [("Browns", 7)].into_iter().collect();
        assert_eq!(resolve("CLEBrowns", &directory).team_id(), Some(7));
    }

    #[test]
    fn test_unresolved() {
        let directory: NameDirectory = [("bills", 1)].into_iter().collect();

        let resolution = resolve("Seahawks", &directory);
        assert_eq!(resolution, Resolution::Unresolved);
        assert!(!resolution.is_resolved());
        assert_eq!(resolution.team_id(), None);
    }

    #[test]
    fn test_first_substring_match_in_directory_order_wins() {
        let directory: NameDirectory = [("New York Giants", 10), ("New York Jets", 11), ("NY", 12)]
            .into_iter()
            .collect();

        // "new york" is contained in both New York entries; the first one wins.
        assert_eq!(resolve("New York", &directory).team_id(), Some(10));
    }

    #[test]
    fn test_exact_match_beats_earlier_substring_match() {
        let directory: NameDirectory = [("Chargers Los Angeles", 3), ("Chargers", 4)]
            .into_iter()
            .collect();

        assert_eq!(resolve("chargers", &directory).team_id(), Some(4));
    }

    #[test]
    fn test_empty_name_never_resolves() {
        let directory: NameDirectory = [("bills", 1)].into_iter().collect();
        assert_eq!(resolve("", &directory), Resolution::Unresolved);
        assert_eq!(resolve("   ", &directory), Resolution::Unresolved);
    }

    #[test]
    fn test_empty_directory_never_resolves() {
        assert_eq!(resolve("Bills", &NameDirectory::new()), Resolution::Unresolved);
    }

    #[test]
    fn test_from_records_skips_unsaved_and_duplicates() {
        let record = |id: Option<TeamId>, name: &str| ScoringRecord {
            id,
            team_name: name.to_string(),
            rushing_td: 0,
            receiving_td: 0,
            total_td: 0,
            two_point_conversions: 0,
        };
        let directory = NameDirectory::from_records(&[
            record(Some(1), "Bills"),
            record(None, "Jets"),
            record(Some(3), "BILLS"),
            record(Some(4), "Dolphins"),
        ]);

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.get("bills").map(|e| e.id), Some(1));
        assert!(directory.get("jets").is_none());
        let keys: Vec<&str> = directory.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["bills", "dolphins"]);
    }
}
