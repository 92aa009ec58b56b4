//! Fact table writes and the song/artist lookup

use sparkify_common::db::{QuerySet, SongArtistLookupKey, SongplayRow};
use sparkify_common::Result;
use sqlx::SqliteConnection;

/// Resolved (song_id, artist_id) pair
pub type SongArtistIds = (String, String);

/// Find the song and artist matching a played track
///
/// Returns `None` on a lookup miss; the catalog need not contain every
/// played track.
pub async fn find_song_artist(
    conn: &mut SqliteConnection,
    queries: &QuerySet,
    key: &SongArtistLookupKey,
) -> Result<Option<SongArtistIds>> {
    let ids = sqlx::query_as::<_, (String, String)>(queries.song_select)
        .bind(&key.title)
        .bind(&key.artist_name)
        .bind(key.duration)
        .fetch_optional(conn)
        .await?;

    Ok(ids)
}

/// Insert one song play
pub async fn save_songplay(
    conn: &mut SqliteConnection,
    queries: &QuerySet,
    play: &SongplayRow,
) -> Result<()> {
    sqlx::query(queries.songplay_insert)
        .bind(play.start_time)
        .bind(play.user_id)
        .bind(&play.level)
        .bind(&play.song_id)
        .bind(&play.artist_id)
        .bind(play.session_id)
        .bind(&play.location)
        .bind(&play.user_agent)
        .execute(conn)
        .await?;

    Ok(())
}
