//! Star schema creation and reset

use crate::db::queries::QuerySet;
use crate::Result;
use sqlx::SqlitePool;
use tracing::info;

/// Create any missing tables (idempotent)
pub async fn create_tables(pool: &SqlitePool, queries: &QuerySet) -> Result<()> {
    for &statement in queries.create_tables {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Tables ready (songplays, users, songs, artists, time)");
    Ok(())
}

/// Drop every table, then create them empty
pub async fn reset_schema(pool: &SqlitePool, queries: &QuerySet) -> Result<()> {
    let mut tx = pool.begin().await?;
    for &statement in queries.drop_tables {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    for &statement in queries.create_tables {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    info!("Schema reset: all tables dropped and recreated");
    Ok(())
}
