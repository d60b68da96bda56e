// Data pipeline: ingestion, processing, storage and export

pub mod export;
pub mod ingestion;
pub mod processing;
pub mod storage;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::apis::StatsSource;
use crate::app::ports::HttpClientPort;
use crate::error::Result;
use crate::types::RunSummary;
use processing::records::{build_scoring_records, build_standings_records};
use processing::NameDirectory;
use storage::Storage;

/// Runs one source at a time against a shared store.
///
/// The scoring run must have been stored before a standings run: the
/// standings run builds its directory from the stored scoring snapshot.
pub struct Pipeline {
    storage: Arc<dyn Storage>,
    http: Arc<dyn HttpClientPort>,
}

impl Pipeline {
    pub fn new(storage: Arc<dyn Storage>, http: Arc<dyn HttpClientPort>) -> Self {
        Self { storage, http }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Fetch the scoring page and replace the stored scoring snapshot.
    #[instrument(skip(self, source), fields(source_name = %source.source_name()))]
    pub async fn run_scoring(&self, source: &dyn StatsSource) -> Result<RunSummary> {
        let name = source.source_name();
        let started_at = Utc::now();
        let t_run = Instant::now();
        info!("🚀 Starting {} run", name);
        eprintln!("🚀 Starting {} run", name);

        let table = source.fetch_table(self.http.as_ref()).await?;
        eprintln!("✅ Fetched {} rows", table.rows.len());

        let mut batch = build_scoring_records(&table, source.field_rules(), source.name_extraction());
        self.storage.replace_scoring_records(&mut batch.records).await?;
        info!(
            "💾 Stored {} scoring records ({} skipped)",
            batch.records.len(),
            batch.skipped
        );

        let summary = finish(name, started_at, batch.records.len(), batch.skipped, 0);
        record_metrics(&summary, t_run);
        Ok(summary)
    }

    /// Fetch the standings page, resolve every team against the stored
    /// scoring snapshot and replace the stored standings snapshot.
    #[instrument(skip(self, source), fields(source_name = %source.source_name()))]
    pub async fn run_standings(&self, source: &dyn StatsSource) -> Result<RunSummary> {
        let name = source.source_name();
        let started_at = Utc::now();
        let t_run = Instant::now();
        info!("🚀 Starting {} run", name);
        eprintln!("🚀 Starting {} run", name);

        let directory = NameDirectory::from_records(&self.storage.list_scoring_records().await?);
        if directory.is_empty() {
            warn!("Team directory is empty; every standings row will be unresolved");
        }
        info!("📇 Built team directory with {} entries", directory.len());

        let table = source.fetch_table(self.http.as_ref()).await?;
        eprintln!("✅ Fetched {} rows", table.rows.len());

        let mut batch = build_standings_records(
            &table,
            source.field_rules(),
            source.name_extraction(),
            &directory,
        );
        self.storage.replace_standings_records(&mut batch.records).await?;
        info!(
            "💾 Stored {} standings records ({} skipped, {} unresolved)",
            batch.records.len(),
            batch.skipped,
            batch.unresolved
        );

        let summary = finish(
            name,
            started_at,
            batch.records.len(),
            batch.skipped,
            batch.unresolved,
        );
        record_metrics(&summary, t_run);
        Ok(summary)
    }

    /// Render the joined report to a CSV file; returns the number of teams.
    pub async fn export<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let rows = self.storage.team_report().await?;
        let written = export::write_report_file(path.as_ref(), &rows)?;
        eprintln!("📄 Exported {} teams to {}", written, path.as_ref().display());
        Ok(written)
    }
}

fn finish(
    source: &str,
    started_at: DateTime<Utc>,
    processed: usize,
    skipped: usize,
    unresolved: usize,
) -> RunSummary {
    RunSummary {
        run_id: Uuid::new_v4(),
        source: source.to_string(),
        processed,
        skipped,
        unresolved,
        started_at,
        finished_at: Utc::now(),
    }
}

fn record_metrics(summary: &RunSummary, t_run: Instant) {
    let source = summary.source.clone();
    counter!("nfl_rows_processed_total", "source" => source.clone())
        .increment(summary.processed as u64);
    counter!("nfl_rows_skipped_total", "source" => source.clone())
        .increment(summary.skipped as u64);
    counter!("nfl_teams_unresolved_total", "source" => source.clone())
        .increment(summary.unresolved as u64);
    histogram!("nfl_pipeline_duration_seconds", "source" => source)
        .record(t_run.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::{LeagueStandingsSource, TeamScoringSource};
    use crate::app::ports::HttpGetResult;
    use crate::error::StatsError;
    use crate::pipeline::storage::InMemoryStorage;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct StubHttp {
        pages: HashMap<String, (u16, String)>,
    }

    #[async_trait]
    impl HttpClientPort for StubHttp {
        async fn get(&self, url: &str) -> std::result::Result<HttpGetResult, String> {
            let (status, body) = self
                .pages
                .get(url)
                .cloned()
                .ok_or_else(|| format!("no route to {url}"))?;
            Ok(HttpGetResult {
                status,
                bytes: body.into_bytes(),
                content_type: "text/html".to_string(),
            })
        }
    }

    const SCORING: &str = r#"<table>
        <thead><tr><th>Team</th><th>Rsh TD</th><th>Rec TD</th><th>Tot TD</th><th>2-PT</th></tr></thead>
        <tbody>
          <tr><td><a href="/bills">BillsBills</a></td><td>31</td><td>28</td><td>63</td><td>2</td></tr>
          <tr><td><a href="/browns">Browns</a></td><td>11</td><td>17</td><td>30</td><td>-</td></tr>
          <tr><td>---</td><td>1</td><td>1</td><td>2</td><td>0</td></tr>
        </tbody></table>"#;

    const STANDINGS: &str = r#"<table>
        <thead><tr><th>NFL Team</th><th>W</th><th>L</th><th>T</th><th>PCT</th></tr></thead>
        <tbody>
          <tr><td>BUF Buffalo Bills</td><td>13</td><td>4</td><td>0</td><td>.765</td></tr>
          <tr><td>CLE xyzBrownsBrowns</td><td>3</td><td>14</td><td>0</td><td>.176</td></tr>
          <tr><td>SEA Seattle Seahawks</td><td>10</td><td>7</td><td>0</td><td>.588</td></tr>
        </tbody></table>"#;

    fn pipeline(pages: &[(&str, u16, &str)]) -> Pipeline {
        let pages = pages
            .iter()
            .map(|(url, status, body)| (url.to_string(), (*status, body.to_string())))
            .collect();
        Pipeline::new(
            Arc::new(InMemoryStorage::new()),
            Arc::new(StubHttp { pages }),
        )
    }

    #[tokio::test]
    async fn test_scoring_then_standings() {
        let pipeline = pipeline(&[("http://stub/scoring", 200, SCORING), ("http://stub/standings", 200, STANDINGS)]);

        let scoring = pipeline
            .run_scoring(&TeamScoringSource::with_url("http://stub/scoring"))
            .await
            .unwrap();
        assert_eq!(scoring.source, "team_scoring");
        assert_eq!(scoring.processed, 2);
        assert_eq!(scoring.skipped, 1);

        let standings = pipeline
            .run_standings(&LeagueStandingsSource::with_url("http://stub/standings"))
            .await
            .unwrap();
        assert_eq!(standings.processed, 3);
        assert_eq!(standings.unresolved, 1);
        assert!(standings.finished_at >= standings.started_at);

        let report = pipeline.storage().team_report().await.unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].team_name, "Bills");
        assert_eq!(report[0].wins, 13);
        assert_eq!(report[1].team_name, "Browns");
        assert_eq!(report[1].losses, 14);
        assert_eq!(report[1].two_point_conversions, 0);
    }

    #[tokio::test]
    async fn test_standings_without_scoring_are_unresolved() {
        let pipeline = pipeline(&[("http://stub/standings", 200, STANDINGS)]);

        let standings = pipeline
            .run_standings(&LeagueStandingsSource::with_url("http://stub/standings"))
            .await
            .unwrap();

        assert_eq!(standings.processed, 3);
        assert_eq!(standings.unresolved, 3);
        assert!(pipeline.storage().team_report().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_http_failure_keeps_previous_snapshot() {
        let pipeline = pipeline(&[("http://stub/scoring", 200, SCORING), ("http://stub/broken", 503, "")]);
        pipeline
            .run_scoring(&TeamScoringSource::with_url("http://stub/scoring"))
            .await
            .unwrap();

        let err = pipeline
            .run_scoring(&TeamScoringSource::with_url("http://stub/broken"))
            .await
            .unwrap_err();
        assert!(matches!(err, StatsError::HttpStatus { status: 503, .. }));

        let err = pipeline
            .run_scoring(&TeamScoringSource::with_url("http://stub/missing"))
            .await
            .unwrap_err();
        assert!(matches!(err, StatsError::Fetch { .. }));

        assert_eq!(pipeline.storage().list_scoring_records().await.unwrap().len(), 2);
    }
}
