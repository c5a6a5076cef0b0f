//! SQLite storage backend (embedded, no external dependencies)

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use fitlog_core::{Exercise, ExerciseStore, FitlogError, LogQuery, User, UserStore};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Connect, retrying indefinitely with a fixed delay instead of
    /// aborting the process on startup failures.
    pub async fn connect_with_retry(database_path: &str, delay: Duration) -> Self {
        loop {
            match Self::new(database_path).await {
                Ok(db) => return db,
                Err(e) => {
                    tracing::warn!(
                        "Database connection failed, retrying in {:?}: {:#}",
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// In-memory database on a single-connection pool, for tests
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new().filename(":memory:");

        // One connection only: each SQLite :memory: connection is its own database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // Users table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(pool)
        .await?;

        // Exercises table; the implicit rowid preserves insertion order
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS exercises (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                description TEXT NOT NULL,
                duration INTEGER NOT NULL,
                date TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_exercises_user_date
            ON exercises (user_id, date)
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

fn storage_err(e: sqlx::Error) -> FitlogError {
    FitlogError::Storage(e.to_string())
}

#[async_trait]
impl UserStore for Database {
    async fn insert_user(&self, user: &User) -> fitlog_core::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username)
            VALUES (?1, ?2)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .execute(&*self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                FitlogError::DuplicateUsername(user.username.clone())
            }
            _ => storage_err(e),
        })?;

        Ok(())
    }

    async fn find_user_by_id(&self, id: &str) -> fitlog_core::Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username FROM users WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(storage_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_user_by_username(&self, username: &str) -> fitlog_core::Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username FROM users WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&*self.pool)
        .await
        .map_err(storage_err)?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_users(&self) -> fitlog_core::Result<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username FROM users ORDER BY rowid ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(storage_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

#[async_trait]
impl ExerciseStore for Database {
    async fn insert_exercise(&self, exercise: &Exercise) -> fitlog_core::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO exercises (id, user_id, description, duration, date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&exercise.id)
        .bind(&exercise.user_id)
        .bind(&exercise.description)
        .bind(exercise.duration)
        .bind(exercise.date)
        .execute(&*self.pool)
        .await
        .map_err(storage_err)?;

        Ok(())
    }

    async fn find_exercises(
        &self,
        user_id: &str,
        query: &LogQuery,
    ) -> fitlog_core::Result<Vec<Exercise>> {
        // ISO dates compare correctly as TEXT; rowid breaks date ties
        // in insertion order. LIMIT -1 means no limit in SQLite.
        let limit = query.limit.map(|n| n as i64).unwrap_or(-1);

        let rows: Vec<ExerciseRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, description, duration, date
            FROM exercises
            WHERE user_id = ?1
              AND (?2 IS NULL OR date >= ?2)
              AND (?3 IS NULL OR date <= ?3)
            ORDER BY date ASC, rowid ASC
            LIMIT ?4
            "#,
        )
        .bind(user_id)
        .bind(query.from)
        .bind(query.to)
        .bind(limit)
        .fetch_all(&*self.pool)
        .await
        .map_err(storage_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    username: String,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            username: r.username,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ExerciseRow {
    id: String,
    user_id: String,
    description: String,
    duration: i64,
    date: NaiveDate,
}

impl From<ExerciseRow> for Exercise {
    fn from(r: ExerciseRow) -> Self {
        Exercise {
            id: r.id,
            user_id: r.user_id,
            description: r.description,
            duration: r.duration,
            date: r.date,
        }
    }
}
