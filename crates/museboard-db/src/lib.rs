use std::{str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use thiserror::Error;

pub mod ads;

pub use ads::{
    create_ad, delete_ad, find_ad, like_ad, list_ads, record_view, AdListFilters, AdRow, NewAd,
    ALL_CATEGORIES,
};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_MIN_CONNECTIONS: u32 = 0;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;
const BUSY_TIMEOUT_SECS: u64 = 5;

/// Idempotent schema setup, safe to run on every startup.
const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS ads ( \
         id INTEGER PRIMARY KEY AUTOINCREMENT, \
         title TEXT NOT NULL, \
         content TEXT NOT NULL, \
         category TEXT NOT NULL, \
         format TEXT NOT NULL, \
         tone TEXT, \
         created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP, \
         views INTEGER NOT NULL DEFAULT 0, \
         likes INTEGER NOT NULL DEFAULT 0 \
     )",
    "CREATE INDEX IF NOT EXISTS idx_ads_created_at ON ads (created_at)",
    "CREATE INDEX IF NOT EXISTS idx_ads_category_created_at ON ads (category, created_at)",
];

#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }
}

impl PoolConfig {
    #[must_use]
    pub fn from_app_config(config: &museboard_core::AppConfig) -> Self {
        Self {
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
            acquire_timeout_secs: config.db_acquire_timeout_secs,
        }
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Open a pool against a SQLite database URL, creating the file if missing.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the URL is malformed or the database cannot be opened.
pub async fn connect_pool(
    database_url: &str,
    config: PoolConfig,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(BUSY_TIMEOUT_SECS));

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await
}

/// Open a private in-memory database held by a single long-lived connection.
///
/// Every `sqlite::memory:` connection is its own database, so the pool is
/// pinned to one connection that never idles out.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if SQLite cannot be initialised.
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Create the `ads` table and its indexes if they do not exist yet.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any DDL statement fails.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), DbError> {
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// Send a `SELECT 1` to verify the pool has a live connection.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}

/// Run a full health check: ping the pool and return a typed error on failure.
///
/// # Errors
///
/// Returns [`DbError`] if the ping fails.
pub async fn health_check(pool: &SqlitePool) -> Result<(), DbError> {
    ping(pool).await?;
    Ok(())
}
