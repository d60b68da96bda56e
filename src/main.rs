use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use nfl_stats::apis::{LeagueStandingsSource, TeamScoringSource};
use nfl_stats::config::{load_dotenv, Config};
use nfl_stats::constants::DEFAULT_CONFIG_PATH;
use nfl_stats::infra::http_client::ReqwestHttp;
use nfl_stats::logging;
use nfl_stats::pipeline::storage::{InMemoryStorage, SqliteStorage, Storage};
use nfl_stats::pipeline::Pipeline;
use nfl_stats::types::RunSummary;

#[derive(Parser)]
#[command(name = "nfl_stats")]
#[command(about = "NFL team scoring and standings scraper")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Season to scrape (overrides config and NFL_STATS_SEASON)
    #[arg(long, global = true)]
    season: Option<u16>,

    /// SQLite database path (overrides config and NFL_STATS_DB)
    #[arg(long, global = true)]
    db: Option<String>,

    /// Keep everything in memory for this process
    #[arg(long, global = true)]
    in_memory: bool,

    /// Print run summaries as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape team scoring and replace the stored scoring snapshot
    Scoring,
    /// Scrape league standings and resolve them against stored scoring
    Standings,
    /// Write the joined scoring and standings report to CSV
    Export {
        /// Output file (defaults to <season>_Team_Scoring_Standings.csv)
        #[arg(long)]
        out: Option<String>,
    },
    /// Scoring, standings and export in order
    Run {
        /// Output file for the export step
        #[arg(long)]
        out: Option<String>,
    },
}

/// Summary text for stdout: pretty JSON with `--json`, otherwise a short
/// human report. Progress lines go to stderr so stdout stays parseable.
fn render_summary(summary: &RunSummary, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(summary)?);
    }
    Ok(format!(
        "\n📊 Results for {}:\n   Processed: {}\n   Skipped: {}\n   Unresolved: {}",
        summary.source, summary.processed, summary.skipped, summary.unresolved
    ))
}

fn print_summary(summary: &RunSummary, json: bool) -> anyhow::Result<()> {
    println!("{}", render_summary(summary, json)?);
    info!(
        run_id = %summary.run_id,
        source = %summary.source,
        processed = summary.processed,
        skipped = summary.skipped,
        unresolved = summary.unresolved,
        "Run finished"
    );
    Ok(())
}

fn open_storage(cli: &Cli, config: &Config) -> anyhow::Result<Arc<dyn Storage>> {
    if cli.in_memory {
        return Ok(Arc::new(InMemoryStorage::new()));
    }
    let storage = SqliteStorage::open(&config.database_path, config.season)
        .with_context(|| format!("opening database {}", config.database_path))?;
    Ok(Arc::new(storage))
}

async fn run_scoring(pipeline: &Pipeline, config: &Config, json: bool) -> anyhow::Result<()> {
    let source = TeamScoringSource::with_url(config.scoring_url());
    let summary = pipeline
        .run_scoring(&source)
        .await
        .context("team scoring run failed")?;
    print_summary(&summary, json)
}

async fn run_standings(pipeline: &Pipeline, config: &Config, json: bool) -> anyhow::Result<()> {
    let source = LeagueStandingsSource::with_url(config.standings_url());
    let summary = pipeline
        .run_standings(&source)
        .await
        .context("league standings run failed")?;
    print_summary(&summary, json)
}

async fn run_export(pipeline: &Pipeline, config: &Config, out: Option<String>) -> anyhow::Result<()> {
    let path = out.unwrap_or_else(|| config.output_path());
    pipeline
        .export(&path)
        .await
        .with_context(|| format!("exporting report to {path}"))?;
    Ok(())
}

async fn run_all(
    pipeline: &Pipeline,
    config: &Config,
    json: bool,
    out: Option<String>,
) -> anyhow::Result<()> {
    eprintln!("🚀 Running full pipeline (scoring + standings + export)...");
    eprintln!("\n📥 Step 1: Team scoring");
    run_scoring(pipeline, config, json).await?;
    eprintln!("\n📥 Step 2: League standings");
    run_standings(pipeline, config, json).await?;
    eprintln!("\n📄 Step 3: Export");
    run_export(pipeline, config, out).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = load_dotenv();
    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    config.apply_env()?;
    if let Some(season) = cli.season {
        config.season = season;
    }
    if let Some(db) = &cli.db {
        config.database_path = db.clone();
    }

    let _log_guard = logging::init_logging(&config.log_dir)
        .with_context(|| format!("creating log directory {}", config.log_dir))?;
    if let Err(e) = dotenv {
        warn!("Ignoring .env: {}", e);
    }
    info!("Season {} using {}", config.season, config.database_path);

    let storage = open_storage(&cli, &config)?;
    let http = Arc::new(ReqwestHttp::new(config.user_agent.clone()));
    let pipeline = Pipeline::new(storage, http);

    let result = match cli.command {
        Commands::Scoring => {
            eprintln!("🏈 Scraping team scoring...");
            run_scoring(&pipeline, &config, cli.json).await
        }
        Commands::Standings => {
            eprintln!("🏈 Scraping league standings...");
            run_standings(&pipeline, &config, cli.json).await
        }
        Commands::Export { out } => run_export(&pipeline, &config, out).await,
        Commands::Run { out } => run_all(&pipeline, &config, cli.json, out).await,
    };

    if let Err(e) = &result {
        error!("{:#}", e);
        eprintln!("❌ {:#}", e);
    }
    result
}
