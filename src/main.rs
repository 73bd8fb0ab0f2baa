// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use skills_leaderboard::{
    aggregate_all, logging, parse_runs_json, report, ConfiguredSource, DataSource, Leaderboard,
    SourceArgs,
};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "skills-leaderboard", version, about = "Ranked, highlighted skills standings")]
struct Cli {
    #[command(flatten)]
    sources: SourceArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive table (default)
    Tui,
    /// Plain-text table on stdout
    Print,
    /// Leaderboard as JSON on stdout
    Json,
    /// Turn raw skills runs ({"<team id>": [runs...]}) into a skills list
    Aggregate {
        /// JSON file with runs keyed by team identifier
        runs: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init("info");

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => run_ui_mode(&cli.sources).await?,
        Command::Print => {
            let board = load_leaderboard(&cli.sources).await?;
            print!("{}", report::render(&board));
        }
        Command::Json => {
            let board = load_leaderboard(&cli.sources).await?;
            println!("{}", serde_json::to_string_pretty(&board)?);
        }
        Command::Aggregate { runs } => run_aggregate(&runs)?,
    }

    Ok(())
}

async fn load_leaderboard(args: &SourceArgs) -> Result<Leaderboard> {
    let source = ConfiguredSource::new(args.source_config());
    info!(source = %source.describe(), cap = args.cap, "loading leaderboard");

    let snapshot = source
        .fetch_snapshot()
        .await
        .context("Failed to fetch data")?;

    Ok(Leaderboard::from_snapshot(&snapshot, args.cap))
}

fn run_aggregate(path: &Path) -> Result<()> {
    let raw = std::fs::read(path)
        .with_context(|| format!("Failed to read runs file {}", path.display()))?;
    let runs_by_team = parse_runs_json(&raw).context("Failed to parse runs file")?;

    let records = aggregate_all(runs_by_team);
    info!(teams = records.len(), "aggregated skills records");

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

#[cfg(feature = "tui")]
async fn run_ui_mode(args: &SourceArgs) -> Result<()> {
    let board = load_leaderboard(args).await?;
    info!(teams = board.len(), "starting UI (press 'q' to quit)");

    let mut app = ui::App::new(board);
    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
async fn run_ui_mode(_args: &SourceArgs) -> Result<()> {
    anyhow::bail!(
        "TUI mode not available. Rebuild with `--features tui`, or use `print` / `json`"
    )
}
