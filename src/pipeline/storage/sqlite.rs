use super::Storage;
use crate::constants::{scoring_table_name, standings_table_name};
use crate::error::Result;
use crate::types::{ScoringRecord, StandingsRecord, TeamReportRow};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// SQLite-backed snapshot store, one scoring and one standings table per
/// season (`team_scoring_<season>`, `league_standings_<season>`).
pub struct SqliteStorage {
    conn: Mutex<Connection>,
    scoring_table: String,
    standings_table: String,
}

impl SqliteStorage {
    pub fn open<P: AsRef<Path>>(path: P, season: u16) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        info!("Opening stats database at {}", path.display());
        Self::init(Connection::open(path)?, season)
    }

    pub fn open_in_memory(season: u16) -> Result<Self> {
        Self::init(Connection::open_in_memory()?, season)
    }

    fn init(conn: Connection, season: u16) -> Result<Self> {
        let scoring_table = scoring_table_name(season);
        let standings_table = standings_table_name(season);

        conn.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {scoring_table} (
                id      INTEGER PRIMARY KEY AUTOINCREMENT,
                Team    TEXT NOT NULL,
                Rsh_TD  INTEGER,
                Rec_TD  INTEGER,
                Tot_TD  INTEGER,
                "2-PT"  INTEGER
            );
            CREATE TABLE IF NOT EXISTS {standings_table} (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                team_id   INTEGER,
                NFL_Team  TEXT NOT NULL,
                W         INTEGER,
                L         INTEGER,
                T         INTEGER,
                FOREIGN KEY (team_id) REFERENCES {scoring_table}(id)
            );
            "#
        ))?;

        Ok(Self {
            conn: Mutex::new(conn),
            scoring_table,
            standings_table,
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn replace_scoring_records(&self, records: &mut [ScoringRecord]) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        tx.execute(&format!("DELETE FROM {}", self.standings_table), [])?;
        tx.execute(&format!("DELETE FROM {}", self.scoring_table), [])?;

        let mut ids = Vec::with_capacity(records.len());
        {
            let mut stmt = tx.prepare(&format!(
                r#"INSERT INTO {} (Team, Rsh_TD, Rec_TD, Tot_TD, "2-PT") VALUES (?1, ?2, ?3, ?4, ?5)"#,
                self.scoring_table
            ))?;
            for record in records.iter() {
                stmt.execute(params![
                    record.team_name,
                    record.rushing_td,
                    record.receiving_td,
                    record.total_td,
                    record.two_point_conversions,
                ])?;
                ids.push(tx.last_insert_rowid());
            }
        }
        tx.commit()?;

        for (record, id) in records.iter_mut().zip(ids) {
            record.id = Some(id);
        }
        debug!("Stored {} scoring records in {}", records.len(), self.scoring_table);
        Ok(())
    }

    async fn list_scoring_records(&self) -> Result<Vec<ScoringRecord>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            r#"SELECT id, Team, Rsh_TD, Rec_TD, Tot_TD, "2-PT" FROM {} ORDER BY Team COLLATE NOCASE, id"#,
            self.scoring_table
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok(ScoringRecord {
                id: Some(row.get(0)?),
                team_name: row.get(1)?,
                rushing_td: row.get::<_, Option<u32>>(2)?.unwrap_or(0),
                receiving_td: row.get::<_, Option<u32>>(3)?.unwrap_or(0),
                total_td: row.get::<_, Option<u32>>(4)?.unwrap_or(0),
                two_point_conversions: row.get::<_, Option<u32>>(5)?.unwrap_or(0),
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    async fn replace_standings_records(&self, records: &mut [StandingsRecord]) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        tx.execute(&format!("DELETE FROM {}", self.standings_table), [])?;

        let mut ids = Vec::with_capacity(records.len());
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {} (team_id, NFL_Team, W, L, T) VALUES (?1, ?2, ?3, ?4, ?5)",
                self.standings_table
            ))?;
            for record in records.iter() {
                stmt.execute(params![
                    record.resolved_team_id,
                    record.team_name,
                    record.wins,
                    record.losses,
                    record.ties,
                ])?;
                ids.push(tx.last_insert_rowid());
            }
        }
        tx.commit()?;

        for (record, id) in records.iter_mut().zip(ids) {
            record.id = Some(id);
        }
        debug!("Stored {} standings records in {}", records.len(), self.standings_table);
        Ok(())
    }

    async fn list_standings_records(&self) -> Result<Vec<StandingsRecord>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT id, team_id, NFL_Team, W, L, T FROM {} ORDER BY id",
            self.standings_table
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok(StandingsRecord {
                id: Some(row.get(0)?),
                resolved_team_id: row.get(1)?,
                team_name: row.get(2)?,
                wins: row.get::<_, Option<u32>>(3)?.unwrap_or(0),
                losses: row.get::<_, Option<u32>>(4)?.unwrap_or(0),
                ties: row.get::<_, Option<u32>>(5)?.unwrap_or(0),
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    async fn team_report(&self) -> Result<Vec<TeamReportRow>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT
                ts.Team,
                COALESCE(ts.Rsh_TD, 0),
                COALESCE(ts.Rec_TD, 0),
                COALESCE(ts.Tot_TD, 0),
                COALESCE(ts."2-PT", 0),
                COALESCE(ls.W, 0),
                COALESCE(ls.L, 0),
                COALESCE(ls.T, 0)
            FROM {} ts
            LEFT JOIN {} ls ON ts.id = ls.team_id
            ORDER BY ts.Team COLLATE NOCASE, ts.id
            "#,
            self.scoring_table, self.standings_table
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok(TeamReportRow {
                team_name: row.get(0)?,
                rushing_td: row.get(1)?,
                receiving_td: row.get(2)?,
                total_td: row.get(3)?,
                two_point_conversions: row.get(4)?,
                wins: row.get(5)?,
                losses: row.get(6)?,
                ties: row.get(7)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}
