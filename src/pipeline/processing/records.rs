use tracing::{debug, warn};

use super::canonical::{canonicalize, NameExtraction};
use super::coerce::coerce_cell;
use super::columns::{locate_columns, missing_fields, FieldIndexMap, FieldRule, StatField};
use super::resolve::{NameDirectory, Resolution};
use crate::types::{RawRow, RawTable, ScoringRecord, StandingsRecord};

/// Scoring records built from one table, plus the rows that had no
/// recoverable team name.
#[derive(Debug, Clone, Default)]
pub struct ScoringBatch {
    pub records: Vec<ScoringRecord>,
    pub skipped: usize,
}

/// Standings records built from one table. Every record has gone through
/// resolution; `unresolved` counts those left without a team reference.
#[derive(Debug, Clone, Default)]
pub struct StandingsBatch {
    pub records: Vec<StandingsRecord>,
    pub skipped: usize,
    pub unresolved: usize,
}

/// Text of the team cell: the located team column, or the first column when
/// no header mentions a team.
pub fn team_cell<'a>(row: &'a [String], columns: &FieldIndexMap) -> Option<&'a str> {
    let idx = columns.get(StatField::Team).unwrap_or(0);
    row.get(idx).map(String::as_str)
}

pub fn scoring_record_from_row(
    row: &RawRow,
    columns: &FieldIndexMap,
    extraction: NameExtraction,
) -> Option<ScoringRecord> {
    let team_name = canonicalize(team_cell(row, columns)?, extraction)?;

    Some(ScoringRecord {
        id: None,
        team_name,
        rushing_td: coerce_cell(row, columns.get(StatField::RushingTd)),
        receiving_td: coerce_cell(row, columns.get(StatField::ReceivingTd)),
        total_td: coerce_cell(row, columns.get(StatField::TotalTd)),
        two_point_conversions: coerce_cell(row, columns.get(StatField::TwoPointConversions)),
    })
}

/// Build an unresolved standings record from one row.
pub fn standings_record_from_row(
    row: &RawRow,
    columns: &FieldIndexMap,
    extraction: NameExtraction,
) -> Option<StandingsRecord> {
    let team_name = canonicalize(team_cell(row, columns)?, extraction)?;

    Some(StandingsRecord {
        id: None,
        resolved_team_id: None,
        team_name,
        wins: coerce_cell(row, columns.get(StatField::Wins)),
        losses: coerce_cell(row, columns.get(StatField::Losses)),
        ties: coerce_cell(row, columns.get(StatField::Ties)),
    })
}

fn locate(table: &RawTable, rules: &[FieldRule]) -> FieldIndexMap {
    let columns = locate_columns(&table.headers, rules);
    let missing = missing_fields(&columns, rules);
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(StatField::as_str).collect();
        warn!("Columns not found in header, defaulting to 0: {}", names.join(", "));
    }
    columns
}

pub fn build_scoring_records(
    table: &RawTable,
    rules: &[FieldRule],
    extraction: NameExtraction,
) -> ScoringBatch {
    let columns = locate(table, rules);
    let mut batch = ScoringBatch::default();

    for (i, row) in table.rows.iter().enumerate() {
        match scoring_record_from_row(row, &columns, extraction) {
            Some(record) => batch.records.push(record),
            None => {
                debug!("Skipping row {}: no recoverable team name in {:?}", i, row.first());
                batch.skipped += 1;
            }
        }
    }

    batch
}

/// Build standings records and resolve each against `directory`, which must
/// already hold every scoring record of the run.
pub fn build_standings_records(
    table: &RawTable,
    rules: &[FieldRule],
    extraction: NameExtraction,
    directory: &NameDirectory,
) -> StandingsBatch {
    let columns = locate(table, rules);
    let mut batch = StandingsBatch::default();

    for (i, row) in table.rows.iter().enumerate() {
        let Some(mut record) = standings_record_from_row(row, &columns, extraction) else {
            debug!("Skipping row {}: no recoverable team name in {:?}", i, row.first());
            batch.skipped += 1;
            continue;
        };

        match directory.resolve(&record.team_name) {
            Resolution::Matched { id, name, kind } => {
                debug!("Resolved {:?} to {:?} (id {}, {:?})", record.team_name, name, id, kind);
                record.resolved_team_id = Some(id);
                record.team_name = name;
            }
            Resolution::Unresolved => {
                warn!("No scoring team matches standings team {:?}", record.team_name);
                batch.unresolved += 1;
            }
        }
        batch.records.push(record);
    }

    batch
}
