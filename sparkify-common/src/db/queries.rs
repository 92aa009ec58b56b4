//! Named SQL statements for the Sparkify star schema
//!
//! Every statement the loader issues is listed here and reached through a
//! [`QuerySet`] that callers pass around explicitly.

// ============================================================================
// DROP TABLES
// ============================================================================

pub const SONGPLAY_TABLE_DROP: &str = "DROP TABLE IF EXISTS songplays";
pub const USER_TABLE_DROP: &str = "DROP TABLE IF EXISTS users";
pub const SONG_TABLE_DROP: &str = "DROP TABLE IF EXISTS songs";
pub const ARTIST_TABLE_DROP: &str = "DROP TABLE IF EXISTS artists";
pub const TIME_TABLE_DROP: &str = "DROP TABLE IF EXISTS time";

// ============================================================================
// CREATE TABLES
// ============================================================================

pub const SONGPLAY_TABLE_CREATE: &str = r#"
    CREATE TABLE IF NOT EXISTS songplays (
        songplay_id INTEGER PRIMARY KEY AUTOINCREMENT,
        start_time TIMESTAMP NOT NULL,
        user_id INTEGER NOT NULL,
        level TEXT,
        song_id TEXT,
        artist_id TEXT,
        session_id INTEGER,
        location TEXT,
        user_agent TEXT
    )
"#;

pub const USER_TABLE_CREATE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id INTEGER PRIMARY KEY,
        first_name TEXT,
        last_name TEXT,
        gender TEXT,
        level TEXT
    )
"#;

pub const SONG_TABLE_CREATE: &str = r#"
    CREATE TABLE IF NOT EXISTS songs (
        song_id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        artist_id TEXT NOT NULL,
        year INTEGER,
        duration REAL NOT NULL
    )
"#;

pub const ARTIST_TABLE_CREATE: &str = r#"
    CREATE TABLE IF NOT EXISTS artists (
        artist_id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        location TEXT,
        latitude REAL,
        longitude REAL
    )
"#;

pub const TIME_TABLE_CREATE: &str = r#"
    CREATE TABLE IF NOT EXISTS time (
        start_time TIMESTAMP PRIMARY KEY,
        hour INTEGER NOT NULL,
        day INTEGER NOT NULL,
        week INTEGER NOT NULL,
        month INTEGER NOT NULL,
        year INTEGER NOT NULL,
        weekday INTEGER NOT NULL
    )
"#;

// ============================================================================
// INSERT RECORDS
// ============================================================================

/// (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent)
pub const SONGPLAY_TABLE_INSERT: &str = r#"
    INSERT INTO songplays (
        start_time, user_id, level, song_id, artist_id, session_id, location, user_agent
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
"#;

/// (user_id, first_name, last_name, gender, level)
pub const USER_TABLE_INSERT: &str = r#"
    INSERT INTO users (user_id, first_name, last_name, gender, level)
    VALUES (?, ?, ?, ?, ?)
    ON CONFLICT(user_id) DO UPDATE SET
        first_name = excluded.first_name,
        last_name = excluded.last_name,
        gender = excluded.gender,
        level = excluded.level
"#;

/// (song_id, title, artist_id, year, duration)
pub const SONG_TABLE_INSERT: &str = r#"
    INSERT INTO songs (song_id, title, artist_id, year, duration)
    VALUES (?, ?, ?, ?, ?)
    ON CONFLICT(song_id) DO UPDATE SET
        title = excluded.title,
        artist_id = excluded.artist_id,
        year = excluded.year,
        duration = excluded.duration
"#;

/// (artist_id, name, location, latitude, longitude)
pub const ARTIST_TABLE_INSERT: &str = r#"
    INSERT INTO artists (artist_id, name, location, latitude, longitude)
    VALUES (?, ?, ?, ?, ?)
    ON CONFLICT(artist_id) DO UPDATE SET
        name = excluded.name,
        location = excluded.location,
        latitude = excluded.latitude,
        longitude = excluded.longitude
"#;

/// (start_time, hour, day, week, month, year, weekday)
pub const TIME_TABLE_INSERT: &str = r#"
    INSERT INTO time (start_time, hour, day, week, month, year, weekday)
    VALUES (?, ?, ?, ?, ?, ?, ?)
    ON CONFLICT(start_time) DO NOTHING
"#;

// ============================================================================
// FIND SONGS
// ============================================================================

/// (title, artist name, duration) -> (song_id, artist_id)
///
/// Ties resolve to the lowest (song_id, artist_id) pair.
pub const SONG_SELECT: &str = r#"
    SELECT songs.song_id, artists.artist_id
    FROM songs
    JOIN artists ON songs.artist_id = artists.artist_id
    WHERE songs.title = ? AND artists.name = ? AND songs.duration = ?
    ORDER BY songs.song_id, artists.artist_id
    LIMIT 1
"#;

/// Statements used by one loader run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySet {
    pub song_insert: &'static str,
    pub artist_insert: &'static str,
    pub time_insert: &'static str,
    pub user_insert: &'static str,
    pub songplay_insert: &'static str,
    pub song_select: &'static str,
    /// Table DDL in creation order (dimensions before the fact table)
    pub create_tables: &'static [&'static str],
    /// Drop statements, fact table first
    pub drop_tables: &'static [&'static str],
}

impl QuerySet {
    /// Statements for the Sparkify star schema
    pub const SPARKIFY: QuerySet = QuerySet {
        song_insert: SONG_TABLE_INSERT,
        artist_insert: ARTIST_TABLE_INSERT,
        time_insert: TIME_TABLE_INSERT,
        user_insert: USER_TABLE_INSERT,
        songplay_insert: SONGPLAY_TABLE_INSERT,
        song_select: SONG_SELECT,
        create_tables: &[
            USER_TABLE_CREATE,
            SONG_TABLE_CREATE,
            ARTIST_TABLE_CREATE,
            TIME_TABLE_CREATE,
            SONGPLAY_TABLE_CREATE,
        ],
        drop_tables: &[
            SONGPLAY_TABLE_DROP,
            USER_TABLE_DROP,
            SONG_TABLE_DROP,
            ARTIST_TABLE_DROP,
            TIME_TABLE_DROP,
        ],
    };
}

impl Default for QuerySet {
    fn default() -> Self {
        Self::SPARKIFY
    }
}
