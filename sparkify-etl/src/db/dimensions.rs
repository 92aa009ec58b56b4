//! Dimension table writes (songs, artists, users, time)

use sparkify_common::db::{ArtistRow, QuerySet, SongRow, TimeRow, UserRow};
use sparkify_common::Result;
use sqlx::SqliteConnection;

/// Upsert one song
pub async fn save_song(conn: &mut SqliteConnection, queries: &QuerySet, song: &SongRow) -> Result<()> {
    sqlx::query(queries.song_insert)
        .bind(&song.song_id)
        .bind(&song.title)
        .bind(&song.artist_id)
        .bind(song.year)
        .bind(song.duration)
        .execute(conn)
        .await?;

    Ok(())
}

/// Upsert one artist
pub async fn save_artist(
    conn: &mut SqliteConnection,
    queries: &QuerySet,
    artist: &ArtistRow,
) -> Result<()> {
    sqlx::query(queries.artist_insert)
        .bind(&artist.artist_id)
        .bind(&artist.name)
        .bind(&artist.location)
        .bind(artist.latitude)
        .bind(artist.longitude)
        .execute(conn)
        .await?;

    Ok(())
}

/// Insert one time row (duplicate start times are left as they are)
pub async fn save_time(conn: &mut SqliteConnection, queries: &QuerySet, time: &TimeRow) -> Result<()> {
    sqlx::query(queries.time_insert)
        .bind(time.start_time)
        .bind(time.hour)
        .bind(time.day)
        .bind(time.week)
        .bind(time.month)
        .bind(time.year)
        .bind(time.weekday)
        .execute(conn)
        .await?;

    Ok(())
}

/// Upsert one user; the latest level wins
pub async fn save_user(conn: &mut SqliteConnection, queries: &QuerySet, user: &UserRow) -> Result<()> {
    sqlx::query(queries.user_insert)
        .bind(user.user_id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.gender)
        .bind(&user.level)
        .execute(conn)
        .await?;

    Ok(())
}
