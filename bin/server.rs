// Skills Leaderboard - Web Server

use anyhow::{Context, Result};
use clap::Parser;
use skills_leaderboard::server::{router, AppState};
use skills_leaderboard::{logging, ConfiguredSource, DataSource, SourceArgs};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "leaderboard-server", version, about = "Serve the skills leaderboard over HTTP")]
struct Cli {
    #[command(flatten)]
    sources: SourceArgs,

    /// Address to listen on
    #[arg(long, env = "LEADERBOARD_BIND", default_value = "0.0.0.0:3000")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init("info");

    let cli = Cli::parse();

    let source = ConfiguredSource::new(cli.sources.source_config());
    info!(source = %source.describe(), cap = cli.sources.cap, "configured data sources");

    let state = AppState {
        source: Arc::new(source),
        cap: cli.sources.cap,
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&cli.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", cli.bind))?;

    info!("server running on http://{}", cli.bind);
    info!("  API: http://{}/api/leaderboard", cli.bind);

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
