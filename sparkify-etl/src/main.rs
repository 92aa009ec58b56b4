//! sparkify-etl - Song and activity log loader
//!
//! Loads song metadata and user activity logs from two directory trees
//! into the Sparkify star schema (songplays fact table; songs, artists,
//! users and time dimensions).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sparkify_common::config::{load_toml_config, CliOverrides, EtlConfig};
use tracing::{error, info};

/// Command-line arguments for sparkify-etl
#[derive(Parser, Debug)]
#[command(name = "sparkify-etl")]
#[command(about = "Load Sparkify song and log data into the star schema")]
#[command(version)]
struct Args {
    /// SQLite database file (created if missing)
    #[arg(short, long, env = "SPARKIFY_DATABASE")]
    database: Option<PathBuf>,

    /// Root folder of song metadata files
    #[arg(long, env = "SPARKIFY_SONG_DATA")]
    song_data: Option<PathBuf>,

    /// Root folder of activity log files
    #[arg(long, env = "SPARKIFY_LOG_DATA")]
    log_data: Option<PathBuf>,

    /// TOML config file (default: <config dir>/sparkify/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Drop and recreate all tables before loading
    #[arg(long)]
    reset_schema: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting sparkify-etl v{}", env!("CARGO_PKG_VERSION"));

    let toml_config = load_toml_config(args.config.as_deref())?;
    let config = EtlConfig::resolve(
        CliOverrides {
            database_path: args.database,
            song_data: args.song_data,
            log_data: args.log_data,
            reset_schema: args.reset_schema,
        },
        toml_config,
    );

    info!("Database: {}", config.database_path.display());
    info!("Song data: {}", config.song_data.display());
    info!("Log data: {}", config.log_data.display());

    let report = match sparkify_etl::run_pipeline(&config).await {
        Ok(report) => report,
        Err(e) => {
            error!("ETL run failed: {}", e);
            return Err(e).context("ETL run failed");
        }
    };

    info!(
        "Done: {}/{} song files, {}/{} log files committed",
        report.songs.files_committed,
        report.songs.files_found,
        report.events.files_committed,
        report.events.files_found
    );

    Ok(())
}
