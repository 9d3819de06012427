//! Database row types for SQLite and PostgreSQL.

use sqlx::FromRow;

use weather_types::{Reading, RepoError};

/// Reading row from PostgreSQL.
#[cfg(feature = "postgres")]
#[derive(FromRow)]
pub struct PgReadingRow {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub temperature: f64,
}

#[cfg(feature = "postgres")]
impl PgReadingRow {
    pub fn into_domain(self) -> Result<Reading, RepoError> {
        Ok(Reading::new(self.timestamp, self.temperature))
    }
}

/// Reading row from SQLite (timestamps stored as RFC 3339 text).
#[cfg(feature = "sqlite")]
#[derive(FromRow)]
pub struct SqliteReadingRow {
    pub timestamp: String,
    pub temperature: f64,
}

#[cfg(feature = "sqlite")]
impl SqliteReadingRow {
    pub fn into_domain(self) -> Result<Reading, RepoError> {
        let time = chrono::DateTime::parse_from_rfc3339(&self.timestamp)
            .map_err(|e| RepoError::Database(e.to_string()))?
            .with_timezone(&chrono::Utc);

        Ok(Reading::new(time, self.temperature))
    }
}

/// Formats a timestamp as fixed-width RFC 3339 so that text order is
/// chronological order.
#[cfg(feature = "sqlite")]
pub fn sortable_timestamp(time: &chrono::DateTime<chrono::Utc>) -> String {
    time.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
