use super::Storage;
use crate::error::Result;
use crate::types::{ScoringRecord, StandingsRecord, TeamReportRow};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug)]
struct Tables {
    scoring: Vec<ScoringRecord>,
    standings: Vec<StandingsRecord>,
    next_scoring_id: i64,
    next_standings_id: i64,
}

/// In-memory storage implementation for development/testing.
/// Identifiers start at 1 and keep increasing across replacements.
pub struct InMemoryStorage {
    tables: Mutex<Tables>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables {
                scoring: Vec::new(),
                standings: Vec::new(),
                next_scoring_id: 1,
                next_standings_id: 1,
            }),
        }
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn sorted_by_team(mut records: Vec<ScoringRecord>) -> Vec<ScoringRecord> {
    records.sort_by_cached_key(|r| r.team_name.to_lowercase());
    records
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn replace_scoring_records(&self, records: &mut [ScoringRecord]) -> Result<()> {
        let mut tables = self.tables();
        tables.scoring.clear();
        tables.standings.clear();

        for record in records.iter_mut() {
            let id = tables.next_scoring_id;
            tables.next_scoring_id += 1;
            record.id = Some(id);
            tables.scoring.push(record.clone());
        }

        debug!("Stored {} scoring records", records.len());
        Ok(())
    }

    async fn list_scoring_records(&self) -> Result<Vec<ScoringRecord>> {
        Ok(sorted_by_team(self.tables().scoring.clone()))
    }

    async fn replace_standings_records(&self, records: &mut [StandingsRecord]) -> Result<()> {
        let mut tables = self.tables();
        tables.standings.clear();

        for record in records.iter_mut() {
            let id = tables.next_standings_id;
            tables.next_standings_id += 1;
            record.id = Some(id);
            tables.standings.push(record.clone());
        }

        debug!("Stored {} standings records", records.len());
        Ok(())
    }

    async fn list_standings_records(&self) -> Result<Vec<StandingsRecord>> {
        Ok(self.tables().standings.clone())
    }

    async fn team_report(&self) -> Result<Vec<TeamReportRow>> {
        let tables = self.tables();
        let mut report = Vec::new();

        for scoring in sorted_by_team(tables.scoring.clone()) {
            let mut matched = tables
                .standings
                .iter()
                .filter(|s| s.resolved_team_id.is_some() && s.resolved_team_id == scoring.id)
                .peekable();

            if matched.peek().is_none() {
                report.push(TeamReportRow::join(&scoring, None));
            }
            for standings in matched {
                report.push(TeamReportRow::join(&scoring, Some(standings)));
            }
        }

        Ok(report)
    }
}
