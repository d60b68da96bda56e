use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::constants::{
    default_output_path, season_url, DEFAULT_DATABASE_PATH, DEFAULT_LOG_DIR, DEFAULT_SEASON,
    DEFAULT_USER_AGENT, LEAGUE_STANDINGS_URL, TEAM_SCORING_URL,
};
use crate::error::{Result, StatsError};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub season: u16,
    pub database_path: String,
    /// Export target; `<season>_Team_Scoring_Standings.csv` when unset
    pub output_path: Option<String>,
    pub log_dir: String,
    pub user_agent: String,
    /// Page templates, `{season}` substituted at use
    pub scoring_url: String,
    pub standings_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            season: DEFAULT_SEASON,
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            output_path: None,
            log_dir: DEFAULT_LOG_DIR.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            scoring_url: TEAM_SCORING_URL.to_string(),
            standings_url: LEAGUE_STANDINGS_URL.to_string(),
        }
    }
}

impl Config {
    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            StatsError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `NFL_STATS_DB`, `NFL_STATS_SEASON` and `NFL_STATS_OUTPUT` from the
    /// process environment (after `.env` has been loaded).
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(db) = lookup("NFL_STATS_DB").filter(|v| !v.trim().is_empty()) {
            self.database_path = db;
        }
        if let Some(season) = lookup("NFL_STATS_SEASON").filter(|v| !v.trim().is_empty()) {
            self.season = season.trim().parse().map_err(|_| {
                StatsError::Config(format!("NFL_STATS_SEASON is not a season: {season:?}"))
            })?;
        }
        if let Some(out) = lookup("NFL_STATS_OUTPUT").filter(|v| !v.trim().is_empty()) {
            self.output_path = Some(out);
        }
        Ok(())
    }

    pub fn scoring_url(&self) -> String {
        season_url(&self.scoring_url, self.season)
    }

    pub fn standings_url(&self) -> String {
        season_url(&self.standings_url, self.season)
    }

    pub fn output_path(&self) -> String {
        match &self.output_path {
            Some(path) => path.clone(),
            None => default_output_path(self.season),
        }
    }
}

/// Load `.env` from the working directory or a parent. A missing file is
/// not an error; an unreadable or malformed one is returned so the caller can
/// report it once logging is up.
pub fn load_dotenv() -> Result<()> {
    ignore_missing(dotenv::dotenv().map(|_| ()))
}

pub fn load_dotenv_from<P: AsRef<Path>>(path: P) -> Result<()> {
    ignore_missing(dotenv::from_path(path.as_ref()))
}

fn ignore_missing(result: std::result::Result<(), dotenv::Error>) -> Result<()> {
    match result {
        Err(e) if !e.not_found() => Err(StatsError::Config(format!("Unreadable .env file: {e}"))),
        _ => Ok(()),
    }
}
