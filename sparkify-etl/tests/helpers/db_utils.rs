//! Database Test Utilities

use anyhow::Result;
use sparkify_common::db::{create_tables, init_database, QuerySet};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Create temporary test database with all tables created
///
/// Returns (TempDir, SqlitePool) - TempDir must be kept alive for duration of test
pub async fn create_test_db() -> Result<(TempDir, SqlitePool)> {
    let temp_dir = TempDir::new()?;
    let pool = init_database(&temp_dir.path().join("sparkify_test.db")).await?;
    create_tables(&pool, &QuerySet::SPARKIFY).await?;
    Ok((temp_dir, pool))
}

/// Count rows in a table
pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    let query = format!("SELECT COUNT(*) FROM {}", table);
    sqlx::query_scalar(&query).fetch_one(pool).await.unwrap()
}

/// (user_id, song_id, artist_id) of every songplay, in insertion order
pub async fn songplay_ids(pool: &SqlitePool) -> Vec<(i64, Option<String>, Option<String>)> {
    sqlx::query_as("SELECT user_id, song_id, artist_id FROM songplays ORDER BY songplay_id")
        .fetch_all(pool)
        .await
        .unwrap()
}
