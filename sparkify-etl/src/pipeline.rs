//! Pipeline entry point
//!
//! One run opens one database session, loads song data, then log data,
//! and closes the session. Song data goes first because songplay rows
//! resolve their song/artist ids against it.

use sparkify_common::config::EtlConfig;
use sparkify_common::db::{create_tables, init_database, reset_schema, QuerySet};
use sparkify_common::{Error, Result};
use sqlx::SqlitePool;
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::services::{process_files, BatchReport, FileScanner, LogFileLoader, SongFileLoader};

/// Outcome of a full run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub run_id: Uuid,
    pub songs: BatchReport,
    pub events: BatchReport,
}

/// Open the configured database and run the pipeline
///
/// Connection failures propagate immediately; nothing is retried.
pub async fn run_pipeline(config: &EtlConfig) -> Result<PipelineReport> {
    let pool = init_database(&config.database_path).await?;
    let result = run_with_pool(&pool, config, &QuerySet::SPARKIFY).await;
    pool.close().await;
    result
}

/// Run the pipeline on an open session
///
/// Both roots are scanned before any file is loaded, so a missing root
/// aborts the run with nothing written.
pub async fn run_with_pool(
    pool: &SqlitePool,
    config: &EtlConfig,
    queries: &QuerySet,
) -> Result<PipelineReport> {
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("etl_run", run_id = %run_id);

    async move {
        let scanner = FileScanner::with_extension(&config.data_extension)
            .ignore_patterns(config.ignore_patterns.clone());
        let song_files = scanner.scan(&config.song_data)?;
        let log_files = scanner.scan(&config.log_data)?;

        if config.reset_schema {
            reset_schema(pool, queries).await?;
        } else {
            create_tables(pool, queries).await?;
        }

        let songs = process_files(
            pool,
            &config.song_data,
            &song_files,
            &SongFileLoader::new(*queries),
        )
        .await?;

        let events = process_files(
            pool,
            &config.log_data,
            &log_files,
            &LogFileLoader::new(*queries),
        )
        .await?;

        info!(
            songs = songs.stats.songs,
            songplays = events.stats.songplays,
            lookup_hits = events.stats.lookup_hits,
            skipped_files = songs.files_skipped.len() + events.files_skipped.len(),
            skipped_records = events.stats.skipped_records,
            "Load complete"
        );

        Ok::<_, Error>(PipelineReport {
            run_id,
            songs,
            events,
        })
    }
    .instrument(span)
    .await
}
