//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use weather_types::{City, Reading, ReadingRepository, RepoError};

use crate::types::PgReadingRow;

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository backed by a connection pool.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_readings_pg.sql"),
        "0001",
    )
    .await
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        tracing::debug!("PostgreSQL migrations applied");
        Ok(Self { pool })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ReadingRepository for PostgresRepo {
    async fn save(&self, city: &City, reading: &Reading) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO readings (name, temperature, timestamp, recorded_at) VALUES ($1, $2, $3, $4)"#,
        )
        .bind(city.as_str())
        .bind(reading.temperature_2m)
        .bind(reading.time)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    async fn latest(&self, city: &City) -> Result<Reading, RepoError> {
        let row: Option<PgReadingRow> = sqlx::query_as(
            r#"SELECT timestamp, temperature FROM readings WHERE name = $1 ORDER BY timestamp DESC, id DESC LIMIT 1"#,
        )
        .bind(city.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.ok_or(RepoError::NotFound)?.into_domain()
    }

    async fn history(&self, city: &City, limit: u32) -> Result<Vec<Reading>, RepoError> {
        let rows: Vec<PgReadingRow> = sqlx::query_as(
            r#"SELECT timestamp, temperature FROM readings WHERE name = $1 ORDER BY timestamp DESC, id DESC LIMIT $2"#,
        )
        .bind(city.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(PgReadingRow::into_domain).collect()
    }

    async fn count(&self, city: &City) -> Result<u64, RepoError> {
        let (count,): (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM readings WHERE name = $1"#)
            .bind(city.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(count.max(0) as u64)
    }
}
