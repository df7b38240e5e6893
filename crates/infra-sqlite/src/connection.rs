// SQLite Connection Pool Setup

use crate::error::map_sqlx_error;
use giftstore_core::error::{AppError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Pool settings
#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseOptions {
    /// Single-connection in-memory database (every connection of
    /// `sqlite::memory:` would otherwise see its own empty database)
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// Create SQLite connection pool with WAL mode and foreign keys enabled
pub async fn create_pool(options: &DatabaseOptions) -> Result<SqlitePool> {
    let connect_options = SqliteConnectOptions::from_str(&options.url)
        .map_err(|e| AppError::Config(format!("Invalid database url '{}': {}", options.url, e)))?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(options.max_connections.max(1))
        .connect_with(connect_options)
        .await
        .map_err(map_sqlx_error)?;

    Ok(pool)
}
