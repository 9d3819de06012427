//! SQLite repository adapter.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use weather_types::{City, Reading, ReadingRepository, RepoError};

use crate::types::{SqliteReadingRow, sortable_timestamp};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let repo = Self { pool };
        repo.create_schema()
            .await
            .map_err(|e| anyhow::anyhow!("Migration 0001 failed: {}", e))?;
        Ok(repo)
    }

    /// Applies the readings DDL; every statement is idempotent.
    async fn create_schema(&self) -> Result<(), RepoError> {
        let ddl = include_str!("../migrations/0001_create_readings.sql");
        for statement in ddl.split(';') {
            let stmt = statement.trim();
            if !stmt.is_empty() {
                sqlx::query(stmt)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| RepoError::Database(e.to_string()))?;
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ReadingRepository for SqliteRepo {
    async fn save(&self, city: &City, reading: &Reading) -> Result<(), RepoError> {
        let recorded_at = sortable_timestamp(&chrono::Utc::now());

        sqlx::query(
            r#"INSERT INTO readings (name, temperature, timestamp, recorded_at) VALUES (?, ?, ?, ?)"#,
        )
        .bind(city.as_str())
        .bind(reading.temperature_2m)
        .bind(sortable_timestamp(&reading.time))
        .bind(&recorded_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    async fn latest(&self, city: &City) -> Result<Reading, RepoError> {
        let row: Option<SqliteReadingRow> = sqlx::query_as(
            r#"SELECT timestamp, temperature FROM readings WHERE name = ? ORDER BY timestamp DESC, id DESC LIMIT 1"#,
        )
        .bind(city.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.ok_or(RepoError::NotFound)?.into_domain()
    }

    async fn history(&self, city: &City, limit: u32) -> Result<Vec<Reading>, RepoError> {
        let rows: Vec<SqliteReadingRow> = sqlx::query_as(
            r#"SELECT timestamp, temperature FROM readings WHERE name = ? ORDER BY timestamp DESC, id DESC LIMIT ?"#,
        )
        .bind(city.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(SqliteReadingRow::into_domain).collect()
    }

    async fn count(&self, city: &City) -> Result<u64, RepoError> {
        let (count,): (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM readings WHERE name = ?"#)
            .bind(city.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(count.max(0) as u64)
    }
}
