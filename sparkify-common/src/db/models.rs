//! Dimension and fact row models
//!
//! Field order in each struct is the column order of its insert statement.

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};

/// `songs` dimension row
#[derive(Debug, Clone, PartialEq)]
pub struct SongRow {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i64,
    pub duration: f64,
}

/// `artists` dimension row
#[derive(Debug, Clone, PartialEq)]
pub struct ArtistRow {
    pub artist_id: String,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// `time` dimension row, decomposed from one play timestamp (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRow {
    pub start_time: NaiveDateTime,
    pub hour: u32,
    pub day: u32,
    /// ISO 8601 week number
    pub week: u32,
    pub month: u32,
    pub year: i32,
    /// Monday = 0 .. Sunday = 6
    pub weekday: u32,
}

impl TimeRow {
    /// Decompose a millisecond epoch timestamp
    ///
    /// Returns `None` when the value lies outside the representable range.
    pub fn from_epoch_millis(ts: i64) -> Option<Self> {
        let start_time = DateTime::from_timestamp_millis(ts)?.naive_utc();
        Some(Self {
            start_time,
            hour: start_time.hour(),
            day: start_time.day(),
            week: start_time.iso_week().week(),
            month: start_time.month(),
            year: start_time.year(),
            weekday: start_time.weekday().num_days_from_monday(),
        })
    }
}

/// `users` dimension row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
}

/// `songplays` fact row
#[derive(Debug, Clone, PartialEq)]
pub struct SongplayRow {
    pub start_time: NaiveDateTime,
    pub user_id: i64,
    pub level: Option<String>,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: Option<i64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

/// Key used to resolve a played track against the song and artist tables
#[derive(Debug, Clone, PartialEq)]
pub struct SongArtistLookupKey {
    pub title: String,
    pub artist_name: String,
    pub duration: f64,
}
