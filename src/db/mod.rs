//! Result store: SQLite-backed community entry persistence
//!
//! The store is optional at runtime. Without a configured database URL
//! the process runs in degraded mode: writes are skipped and the
//! community listing serves an empty collection.

pub mod entries;

use crate::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

/// Connect to the configured database and create tables if needed
pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    // Concurrent submissions race only at the SQLite layer; WAL keeps
    // readers unblocked while one writer appends.
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    entries::init_tables(&pool).await?;
    info!("Result store ready: {database_url}");

    Ok(pool)
}
