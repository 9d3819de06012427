//! Repository port trait.
//!
//! Adapters (Postgres, SQLite) implement this trait.

use crate::domain::{City, Reading};
use crate::error::RepoError;

/// Append-only store of readings, keyed by city.
///
/// `latest` must observe every `save` that has already returned.
#[async_trait::async_trait]
pub trait ReadingRepository: Send + Sync + 'static {
    /// Appends a new reading for the city.
    async fn save(&self, city: &City, reading: &Reading) -> Result<(), RepoError>;

    /// Returns the reading with the greatest timestamp for the city.
    ///
    /// Readings sharing a timestamp resolve to the one saved last.
    /// Fails with [`RepoError::NotFound`] when nothing is stored.
    async fn latest(&self, city: &City) -> Result<Reading, RepoError>;

    /// Returns up to `limit` readings for the city, newest first.
    async fn history(&self, city: &City, limit: u32) -> Result<Vec<Reading>, RepoError>;

    /// Counts the readings stored for the city.
    async fn count(&self, city: &City) -> Result<u64, RepoError>;
}
