pub mod league_standings;
pub mod team_scoring;

use async_trait::async_trait;
use tracing::info;

use crate::app::ports::HttpClientPort;
use crate::error::{Result, StatsError};
use crate::pipeline::ingestion::{HtmlTableParser, TableParser};
use crate::pipeline::processing::{FieldRule, NameExtraction};
use crate::types::RawTable;

pub use league_standings::LeagueStandingsSource;
pub use team_scoring::TeamScoringSource;

/// One tabular page the pipeline reads.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Unique identifier for this source
    fn source_name(&self) -> &'static str;

    fn url(&self) -> &str;

    /// Header rules, in priority order
    fn field_rules(&self) -> &'static [FieldRule];

    /// How team cells are turned into canonical names
    fn name_extraction(&self) -> NameExtraction;

    /// Whether team cells should be read from their link text
    fn prefer_link_text(&self) -> bool {
        false
    }

    fn parser(&self) -> HtmlTableParser {
        HtmlTableParser::new(self.source_name(), self.prefer_link_text())
    }

    /// Fetch the page and parse its first table.
    async fn fetch_table(&self, http: &dyn HttpClientPort) -> Result<RawTable> {
        info!("Fetching {} from {}", self.source_name(), self.url());
        let resp = http
            .get(self.url())
            .await
            .map_err(|message| StatsError::Fetch {
                url: self.url().to_string(),
                message,
            })?;

        if !resp.is_success() {
            return Err(StatsError::HttpStatus {
                url: self.url().to_string(),
                status: resp.status,
            });
        }

        self.parser().parse(&resp.text())
    }
}
