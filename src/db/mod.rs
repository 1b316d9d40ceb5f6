//! Database module for feedhub.
//!
//! Provides SQLite connectivity via sqlx and migration management.

mod schema;
mod user;

pub use schema::MIGRATIONS;
pub use user::{NewUser, User, UserRepository};

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::{FeedHubError, Result};

/// Connection pool alias used throughout the crate.
pub type DbPool = SqlitePool;

/// Open a connection pool for the given SQLite URL.
///
/// The database file is created if missing. Foreign keys and WAL mode are
/// enabled on every connection.
pub async fn connect(url: &str) -> Result<DbPool> {
    info!("Opening database at {}", url);

    // SQLite creates the file but not its directory
    if let Some(path) = url.strip_prefix("sqlite:") {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let options = SqliteConnectOptions::from_str(url)
        .map_err(|e| FeedHubError::Database(format!("invalid database URL: {e}")))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| FeedHubError::Database(e.to_string()))?;

    Ok(pool)
}

/// Open an in-memory database for testing.
///
/// A single connection is kept so the in-memory database is shared across
/// all queries on the pool.
pub async fn connect_in_memory() -> Result<DbPool> {
    debug!("Opening in-memory database");

    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(|e| FeedHubError::Database(e.to_string()))?
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .map_err(|e| FeedHubError::Database(e.to_string()))?;

    Ok(pool)
}

/// Get the current schema version.
pub async fn schema_version(pool: &DbPool) -> Result<i64> {
    let table_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        return Ok(0);
    }

    let version: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(version), 0) FROM schema_version")
        .fetch_one(pool)
        .await?;

    Ok(version)
}

/// Apply pending migrations.
pub async fn migrate(pool: &DbPool) -> Result<()> {
    let current_version = schema_version(pool).await?;
    let migrations = MIGRATIONS;

    if current_version as usize >= migrations.len() {
        debug!("Database is up to date (version {})", current_version);
        return Ok(());
    }

    info!(
        "Migrating database from version {} to {}",
        current_version,
        migrations.len()
    );

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
    .execute(pool)
    .await?;

    for (i, migration) in migrations.iter().enumerate().skip(current_version as usize) {
        let version = (i + 1) as i64;
        info!("Applying migration v{}", version);

        let mut tx = pool.begin().await?;

        sqlx::raw_sql(migration).execute(&mut *tx).await?;

        sqlx::query("INSERT INTO schema_version (version) VALUES ($1)")
            .bind(version)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!("Migration v{} applied successfully", version);
    }

    info!(
        "Database migration complete (now at version {})",
        migrations.len()
    );
    Ok(())
}

/// Check if a table exists.
pub async fn table_exists(pool: &DbPool, table_name: &str) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=$1)",
    )
    .bind(table_name)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}
