//! SQLite persistence for to-do items.
//!
//! [`Store`] owns the connection pool for the lifetime of the process and
//! hands out one [`Session`] per unit of work. Repositories in
//! [`repositories`] run their queries on a borrowed session.

pub mod models;
pub mod repositories;

use std::path::Path;

use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool};

pub type DbPool = SqlitePool;

/// A pooled connection scoped to one request. Dropping it returns the
/// connection to the pool, whichever way the caller exits.
pub type Session = PoolConnection<Sqlite>;

/// Database file used by the server binary, relative to the working directory.
pub const DATABASE_FILE: &str = "todolist.db";

const MAX_CONNECTIONS: u32 = 8;

/// Statements that bring an empty database up to the current schema.
/// Each one is idempotent.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS todos ( \
         id           BLOB PRIMARY KEY NOT NULL, \
         item         TEXT NOT NULL CHECK (length(item) <= 200), \
         is_completed BOOLEAN NOT NULL DEFAULT 0, \
         created_at   TEXT NOT NULL, \
         updated_at   TEXT NOT NULL \
     )",
    "CREATE INDEX IF NOT EXISTS idx_todos_item ON todos (item)",
];

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to open database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Failed to create schema: {0}")]
    Schema(#[source] sqlx::Error),
}

/// Process-wide handle to the relational store.
///
/// Cheap to clone: the inner pool is reference counted.
#[derive(Debug, Clone)]
pub struct Store {
    pool: DbPool,
}

impl Store {
    /// Open (or create) the database file at `path` and make sure the
    /// `todos` table exists. Safe to call on an already initialized file.
    pub async fn initialize(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(StoreError::Connect)?;

        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .map_err(StoreError::Schema)?;
        }

        tracing::debug!(path = %path.display(), "Schema ensured");
        Ok(Self { pool })
    }

    /// Acquire a session for one unit of work.
    pub async fn session(&self) -> Result<Session, sqlx::Error> {
        self.pool.acquire().await
    }

    /// Round-trip a trivial query to confirm the database is reachable.
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}
