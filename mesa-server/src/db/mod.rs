//! Database Module
//!
//! SQLite connection pool for the relational menu tier. The tier is
//! optional: when no database path is configured the menu falls back to
//! the structured-file store.

pub mod repository;

use repository::{RepoError, RepoResult};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;

/// Database service, owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (creating if missing) the database at `db_path` and ensure
    /// the schema exists. WAL mode, foreign keys on.
    pub async fn new(db_path: &str) -> RepoResult<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| RepoError::Database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| RepoError::Database(format!("Failed to open database: {e}")))?;

        sqlx::query("PRAGMA busy_timeout = 5000;")
            .execute(&pool)
            .await
            .map_err(|e| RepoError::Database(format!("Failed to set busy_timeout: {e}")))?;

        let service = Self { pool };
        service.init_schema().await?;
        tracing::info!("Database connection established (SQLite WAL)");
        Ok(service)
    }

    /// In-memory database for tests.
    #[doc(hidden)]
    pub async fn in_memory() -> RepoResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| RepoError::Database(e.to_string()))?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;
        let service = Self { pool };
        service.init_schema().await?;
        Ok(service)
    }

    /// Create the menu tables. Idempotent: safe to invoke repeatedly.
    pub async fn init_schema(&self) -> RepoResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS category (
                name     TEXT PRIMARY KEY,
                position INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(format!("Failed to create category table: {e}")))?;

        // Sub-structures with no natural column type (positions, gallery
        // list, translations) live in TEXT columns as JSON blobs.
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS menu_item (
                id               TEXT PRIMARY KEY,
                name             TEXT NOT NULL,
                description      TEXT NOT NULL,
                price            TEXT NOT NULL,
                category         TEXT NOT NULL,
                image            TEXT,
                images           TEXT,
                preparation      TEXT,
                image_position   TEXT,
                images_positions TEXT,
                translations     TEXT,
                hidden           INTEGER NOT NULL DEFAULT 0,
                sort_order       INTEGER NOT NULL DEFAULT 9999
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(format!("Failed to create menu_item table: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let db = DbService::in_memory().await.unwrap();
        db.init_schema().await.unwrap();
        db.init_schema().await.unwrap();
    }
}
