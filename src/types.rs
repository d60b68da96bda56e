use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Header labels of one source table, as rendered.
pub type HeaderRow = Vec<String>;

/// Cell texts of one data row, positionally aligned to the header row.
pub type RawRow = Vec<String>;

/// Storage-assigned identifier of a scoring record.
pub type TeamId = i64;

/// One parsed source table: the header row plus every data row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: HeaderRow,
    pub rows: Vec<RawRow>,
}

/// One row of the team scoring source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRecord {
    pub id: Option<TeamId>,
    pub team_name: String,
    pub rushing_td: u32,
    pub receiving_td: u32,
    pub total_td: u32,
    pub two_point_conversions: u32,
}

/// One row of the league standings source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRecord {
    pub id: Option<i64>,
    /// Identifier of the matching scoring record; `None` when unresolved.
    pub resolved_team_id: Option<TeamId>,
    pub team_name: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

/// Flat joined row handed to the export collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamReportRow {
    #[serde(rename = "Team")]
    pub team_name: String,
    #[serde(rename = "Rushing_Touchdowns")]
    pub rushing_td: u32,
    #[serde(rename = "Receiving_Touchdowns")]
    pub receiving_td: u32,
    #[serde(rename = "Total_Touchdowns")]
    pub total_td: u32,
    #[serde(rename = "Two_Point_Conversions")]
    pub two_point_conversions: u32,
    #[serde(rename = "Wins")]
    pub wins: u32,
    #[serde(rename = "Losses")]
    pub losses: u32,
    #[serde(rename = "Ties")]
    pub ties: u32,
}

impl TeamReportRow {
    /// Left-join one scoring record with its (optional) standings record.
    pub fn join(scoring: &ScoringRecord, standings: Option<&StandingsRecord>) -> Self {
        Self {
            team_name: scoring.team_name.clone(),
            rushing_td: scoring.rushing_td,
            receiving_td: scoring.receiving_td,
            total_td: scoring.total_td,
            two_point_conversions: scoring.two_point_conversions,
            wins: standings.map_or(0, |s| s.wins),
            losses: standings.map_or(0, |s| s.losses),
            ties: standings.map_or(0, |s| s.ties),
        }
    }
}

/// Counts reported at the end of one source run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub source: String,
    pub processed: usize,
    pub skipped: usize,
    pub unresolved: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
