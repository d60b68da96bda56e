pub mod in_memory;
pub mod sqlite;

use crate::error::Result;
use crate::types::{ScoringRecord, StandingsRecord, TeamReportRow};
use async_trait::async_trait;

pub use in_memory::InMemoryStorage;
pub use sqlite::SqliteStorage;

/// Storage trait for persisting scoring and standings snapshots.
///
/// Replacing a snapshot is all-or-nothing: the previous rows are removed, the
/// new batch is written, and identifiers are written back into `records`
/// only once the whole batch is stored.
#[async_trait]
pub trait Storage: Send + Sync {
    // Scoring operations. Replacing scoring also clears standings, whose
    // team references would otherwise dangle.
    async fn replace_scoring_records(&self, records: &mut [ScoringRecord]) -> Result<()>;
    /// Ordered by team name, case-insensitive.
    async fn list_scoring_records(&self) -> Result<Vec<ScoringRecord>>;

    // Standings operations
    async fn replace_standings_records(&self, records: &mut [StandingsRecord]) -> Result<()>;
    async fn list_standings_records(&self) -> Result<Vec<StandingsRecord>>;

    /// Scoring left-joined with standings on the resolved team id, ordered by
    /// team name. Teams without standings read 0 wins, losses and ties.
    async fn team_report(&self) -> Result<Vec<TeamReportRow>>;
}
