//! Song metadata record (one JSON object per file)

use serde::Deserialize;
use sparkify_common::db::{ArtistRow, SongRow};

/// Song metadata as it appears in a song data file
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SongRecord {
    pub song_id: Option<String>,
    pub title: Option<String>,
    pub artist_id: Option<String>,
    pub artist_name: Option<String>,
    pub artist_latitude: Option<f64>,
    pub artist_longitude: Option<f64>,
    pub artist_location: Option<String>,
    #[serde(default)]
    pub year: i64,
    #[serde(default)]
    pub duration: f64,
}

impl SongRecord {
    /// Parse one song data file
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Split into the song and artist dimension rows
    ///
    /// Fails with the name of the first missing identifier.
    pub fn into_rows(self) -> Result<(SongRow, ArtistRow), &'static str> {
        let song_id = non_empty(self.song_id).ok_or("song_id")?;
        let artist_id = non_empty(self.artist_id).ok_or("artist_id")?;

        let song = SongRow {
            song_id,
            title: self.title.unwrap_or_default(),
            artist_id: artist_id.clone(),
            year: self.year,
            duration: self.duration,
        };
        let artist = ArtistRow {
            artist_id,
            name: self.artist_name.unwrap_or_default(),
            location: self.artist_location,
            latitude: self.artist_latitude,
            longitude: self.artist_longitude,
        };
        Ok((song, artist))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
