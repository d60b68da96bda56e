//! Column location: maps a rendered header row onto the semantic fields the
//! pipeline understands.
//!
//! Rules are an ordered slice of `(field, keywords)` pairs evaluated
//! top-to-bottom for every header cell. The first rule with a matching
//! keyword claims the cell; cells matching no rule are left out of the map.
//! A field that never matches is simply absent, and readers fall back to the
//! field's default.

use std::collections::BTreeMap;

/// Semantic fields recognised across both source tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatField {
    Team,
    RushingTd,
    ReceivingTd,
    TotalTd,
    TwoPointConversions,
    Wins,
    Losses,
    Ties,
}

impl StatField {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatField::Team => "team",
            StatField::RushingTd => "rushing_td",
            StatField::ReceivingTd => "receiving_td",
            StatField::TotalTd => "total_td",
            StatField::TwoPointConversions => "two_point_conversions",
            StatField::Wins => "wins",
            StatField::Losses => "losses",
            StatField::Ties => "ties",
        }
    }
}

/// How a keyword is compared against a lower-cased, trimmed header label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordMatch {
    /// Label contains the keyword.
    Contains(&'static str),
    /// Label equals the keyword. Used for one-letter labels ("W", "L", "T")
    /// which would otherwise match almost any column.
    Exact(&'static str),
}

impl KeywordMatch {
    fn matches(&self, label: &str) -> bool {
        match self {
            KeywordMatch::Contains(keyword) => label.contains(keyword),
            KeywordMatch::Exact(keyword) => label == *keyword,
        }
    }
}

/// One entry of a priority-ordered rule list.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: StatField,
    pub keywords: &'static [KeywordMatch],
}

impl FieldRule {
    fn matches(&self, label: &str) -> bool {
        self.keywords.iter().any(|k| k.matches(label))
    }
}

/// Header rules for the team scoring table, in priority order.
pub const SCORING_RULES: &[FieldRule] = &[
    FieldRule {
        field: StatField::Team,
        keywords: &[KeywordMatch::Contains("team")],
    },
    FieldRule {
        field: StatField::RushingTd,
        keywords: &[KeywordMatch::Contains("rsh td"), KeywordMatch::Contains("rush td")],
    },
    FieldRule {
        field: StatField::ReceivingTd,
        keywords: &[KeywordMatch::Contains("rec td"), KeywordMatch::Contains("receiving td")],
    },
    FieldRule {
        field: StatField::TotalTd,
        keywords: &[KeywordMatch::Contains("tot td"), KeywordMatch::Contains("total td")],
    },
    FieldRule {
        field: StatField::TwoPointConversions,
        keywords: &[KeywordMatch::Contains("2-pt"), KeywordMatch::Contains("2pt")],
    },
];

/// Header rules for the league standings table, in priority order.
pub const STANDINGS_RULES: &[FieldRule] = &[
    FieldRule {
        field: StatField::Team,
        keywords: &[KeywordMatch::Contains("team")],
    },
    FieldRule {
        field: StatField::Wins,
        keywords: &[KeywordMatch::Exact("w")],
    },
    FieldRule {
        field: StatField::Losses,
        keywords: &[KeywordMatch::Exact("l")],
    },
    FieldRule {
        field: StatField::Ties,
        keywords: &[KeywordMatch::Exact("t")],
    },
];

/// Semantic field → zero-based column index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldIndexMap {
    indices: BTreeMap<StatField, usize>,
}

impl FieldIndexMap {
    pub fn get(&self, field: StatField) -> Option<usize> {
        self.indices.get(&field).copied()
    }

    pub fn contains(&self, field: StatField) -> bool {
        self.indices.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatField, usize)> + '_ {
        self.indices.iter().map(|(f, i)| (*f, *i))
    }
}

/// Locate the semantic columns of `headers` using `rules`.
///
/// When two header cells resolve to the same field, the later column wins.
pub fn locate_columns<S: AsRef<str>>(headers: &[S], rules: &[FieldRule]) -> FieldIndexMap {
    let mut indices = BTreeMap::new();

    for (idx, header) in headers.iter().enumerate() {
        let label = header.as_ref().trim().to_lowercase();
        if let Some(rule) = rules.iter().find(|rule| rule.matches(&label)) {
            indices.insert(rule.field, idx);
        }
    }

    FieldIndexMap { indices }
}

/// Fields declared by `rules` that were not located in the header.
pub fn missing_fields(map: &FieldIndexMap, rules: &[FieldRule]) -> Vec<StatField> {
    rules
        .iter()
        .map(|rule| rule.field)
        .filter(|field| !map.contains(*field))
        .collect()
}
