//! Activity log loading
//!
//! One log file holds many activity records. Only song plays (`NextSong`)
//! are loaded; each becomes a `time` row, a `users` upsert and a
//! `songplays` row whose song/artist ids are looked up in the dimensions
//! already loaded from song data.

use std::path::Path;

use sparkify_common::db::QuerySet;
use sparkify_common::Result;
use sqlx::SqliteConnection;

use super::batch_driver::{FileProcessor, LoadStats};
use crate::db::dimensions::{save_time, save_user};
use crate::db::songplays::{find_song_artist, save_songplay};
use crate::models::EventBatch;

/// Loads log data files into time, users and songplays
#[derive(Debug, Clone, Copy)]
pub struct LogFileLoader {
    queries: QuerySet,
}

impl LogFileLoader {
    pub fn new(queries: QuerySet) -> Self {
        Self { queries }
    }

    /// Write the rows derived from one parsed batch
    ///
    /// **Order:**
    /// 1. One time row per play
    /// 2. One user upsert per play (later rows for a user win)
    /// 3. Per play: resolve song/artist ids, then insert the songplay
    ///
    /// Skipped records are logged against `path`; they never fail the batch.
    pub async fn process_batch(
        &self,
        conn: &mut SqliteConnection,
        batch: &EventBatch,
        path: &Path,
    ) -> Result<LoadStats> {
        for skipped in &batch.skipped {
            tracing::warn!(
                "Skipping event record {}:{}: {}",
                path.display(),
                skipped.line,
                skipped.reason
            );
        }

        let mut stats = LoadStats {
            records_read: batch.records_read,
            skipped_records: batch.skipped.len(),
            ..Default::default()
        };

        for play in &batch.plays {
            save_time(conn, &self.queries, &play.time).await?;
            stats.time_rows += 1;
        }

        for play in &batch.plays {
            save_user(conn, &self.queries, &play.user).await?;
            stats.users += 1;
        }

        for play in &batch.plays {
            let ids = match &play.lookup_key {
                Some(key) => find_song_artist(conn, &self.queries, key).await?,
                None => None,
            };

            let row = match ids {
                Some((song_id, artist_id)) => {
                    stats.lookup_hits += 1;
                    play.songplay(Some(song_id), Some(artist_id))
                }
                None => {
                    stats.lookup_misses += 1;
                    play.songplay(None, None)
                }
            };

            save_songplay(conn, &self.queries, &row).await?;
            stats.songplays += 1;
        }

        tracing::debug!(
            file = %path.display(),
            plays = batch.plays.len(),
            lookup_hits = stats.lookup_hits,
            "Loaded event batch"
        );

        Ok(stats)
    }
}

impl FileProcessor for LogFileLoader {
    fn kind(&self) -> &'static str {
        "log data"
    }

    async fn process_file(&self, conn: &mut SqliteConnection, path: &Path) -> Result<LoadStats> {
        // Decoded per line, so one bad byte costs one record
        let content = tokio::fs::read(path).await?;
        let batch = EventBatch::parse_bytes(&content);
        self.process_batch(conn, &batch, path).await
    }
}
