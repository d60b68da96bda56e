/// Source names used in logs, metrics and run summaries.
pub const TEAM_SCORING_SOURCE: &str = "team_scoring";
pub const LEAGUE_STANDINGS_SOURCE: &str = "league_standings";

/// Page templates; `{season}` is replaced with the configured season.
pub const TEAM_SCORING_URL: &str =
    "https://www.nfl.com/stats/team-stats/offense/scoring/{season}/reg/all";
pub const LEAGUE_STANDINGS_URL: &str = "https://www.nfl.com/standings/league/{season}/REG";

pub const DEFAULT_SEASON: u16 = 2024;
pub const DEFAULT_DATABASE_PATH: &str = "NFL_Stats.db";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Cell texts that stand for "no value".
pub const MISSING_VALUE_PLACEHOLDERS: &[&str] = &["-", "N/A", "--"];

/// Header row written by the CSV export.
pub const REPORT_HEADERS: [&str; 8] = [
    "Team",
    "Rushing_Touchdowns",
    "Receiving_Touchdowns",
    "Total_Touchdowns",
    "Two_Point_Conversions",
    "Wins",
    "Losses",
    "Ties",
];

/// Substitute the season into a page template.
pub fn season_url(template: &str, season: u16) -> String {
    template.replace("{season}", &season.to_string())
}

/// Default export file name for a season.
pub fn default_output_path(season: u16) -> String {
    format!("{season}_Team_Scoring_Standings.csv")
}

pub fn scoring_table_name(season: u16) -> String {
    format!("team_scoring_{season}")
}

pub fn standings_table_name(season: u16) -> String {
    format!("league_standings_{season}")
}
