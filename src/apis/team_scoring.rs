use crate::constants::{season_url, TEAM_SCORING_SOURCE, TEAM_SCORING_URL};
use crate::pipeline::processing::columns::SCORING_RULES;
use crate::pipeline::processing::{FieldRule, NameExtraction};

use super::StatsSource;

/// Team offense scoring table: touchdowns by type and two-point conversions.
/// This is the reference source whose team names seed the directory.
#[derive(Debug, Clone)]
pub struct TeamScoringSource {
    url: String,
}

impl TeamScoringSource {
    pub fn new(season: u16) -> Self {
        Self::with_url(season_url(TEAM_SCORING_URL, season))
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl StatsSource for TeamScoringSource {
    fn source_name(&self) -> &'static str {
        TEAM_SCORING_SOURCE
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn field_rules(&self) -> &'static [FieldRule] {
        SCORING_RULES
    }

    fn name_extraction(&self) -> NameExtraction {
        NameExtraction::WholeCell
    }

    // The team cell links to the club page; the link text is the clean name.
    fn prefer_link_text(&self) -> bool {
        true
    }
}
