use crate::constants::{season_url, LEAGUE_STANDINGS_SOURCE, LEAGUE_STANDINGS_URL};
use crate::pipeline::processing::columns::STANDINGS_RULES;
use crate::pipeline::processing::{FieldRule, NameExtraction};

use super::StatsSource;

/// League-wide standings table: wins, losses and ties per team. Team cells
/// carry abbreviation, city and nickname run together, so names are
/// recovered from the trailing token.
#[derive(Debug, Clone)]
pub struct LeagueStandingsSource {
    url: String,
}

impl LeagueStandingsSource {
    pub fn new(season: u16) -> Self {
        Self::with_url(season_url(LEAGUE_STANDINGS_URL, season))
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl StatsSource for LeagueStandingsSource {
    fn source_name(&self) -> &'static str {
        LEAGUE_STANDINGS_SOURCE
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn field_rules(&self) -> &'static [FieldRule] {
        STANDINGS_RULES
    }

    fn name_extraction(&self) -> NameExtraction {
        NameExtraction::TailToken
    }
}
