//! Song data loading
//!
//! One song data file holds one song record, which becomes one `songs` row
//! and one `artists` row.

use std::path::Path;

use sparkify_common::db::QuerySet;
use sparkify_common::{Error, Result};
use sqlx::SqliteConnection;

use super::batch_driver::{FileProcessor, LoadStats};
use crate::db::dimensions::{save_artist, save_song};
use crate::models::SongRecord;

/// Loads song data files into the song and artist dimensions
#[derive(Debug, Clone, Copy)]
pub struct SongFileLoader {
    queries: QuerySet,
}

impl SongFileLoader {
    pub fn new(queries: QuerySet) -> Self {
        Self { queries }
    }

    /// Write the rows of one parsed record: song first, then artist
    ///
    /// `path` only labels the error when an identifier is missing.
    pub async fn process_record(
        &self,
        conn: &mut SqliteConnection,
        record: SongRecord,
        path: &Path,
    ) -> Result<LoadStats> {
        let (song, artist) = record.into_rows().map_err(|field| Error::MalformedRecord {
            path: path.to_path_buf(),
            reason: format!("missing required field `{}`", field),
        })?;

        save_song(conn, &self.queries, &song).await?;
        save_artist(conn, &self.queries, &artist).await?;

        tracing::debug!(
            song_id = %song.song_id,
            artist_id = %artist.artist_id,
            "Saved song and artist"
        );

        Ok(LoadStats {
            records_read: 1,
            songs: 1,
            artists: 1,
            ..Default::default()
        })
    }
}

impl FileProcessor for SongFileLoader {
    fn kind(&self) -> &'static str {
        "song data"
    }

    async fn process_file(&self, conn: &mut SqliteConnection, path: &Path) -> Result<LoadStats> {
        let content = read_song_file(path).await?;
        let record = SongRecord::parse(&content).map_err(|e| Error::MalformedRecord {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        self.process_record(conn, record, path).await
    }
}

/// Read a song file as UTF-8 text
///
/// Non-UTF-8 content is a malformed file, not an I/O failure.
async fn read_song_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::InvalidData {
            Error::MalformedRecord {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        } else {
            Error::Io(e)
        }
    })
}
