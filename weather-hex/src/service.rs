//! Weather Application Service
//!
//! Orchestrates the refresh pipeline through the provider and repository
//! ports. Contains NO infrastructure logic - pure orchestration.

use weather_types::{
    AppError, City, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT, Reading, ReadingRepository,
    RefreshError, WeatherProvider,
};

/// Application service for weather operations.
///
/// Generic over the provider and the repository - the adapters are injected
/// at compile time, so tests can swap in stubs without network access.
pub struct WeatherService<P: WeatherProvider, R: ReadingRepository> {
    provider: P,
    repo: R,
}

impl<P: WeatherProvider, R: ReadingRepository> WeatherService<P, R> {
    /// Creates a new weather service.
    pub fn new(provider: P, repo: R) -> Self {
        Self { provider, repo }
    }

    /// Returns a reference to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Refresh
    // ─────────────────────────────────────────────────────────────────────────────

    /// Runs one refresh cycle: geocode, fetch the temperature, persist.
    ///
    /// The first failing step aborts the cycle and its error is returned
    /// unchanged. Nothing is retried. Every success appends a new reading.
    #[tracing::instrument(skip(self), fields(city = %city))]
    pub async fn refresh(&self, city: &City) -> Result<Reading, RefreshError> {
        let location = self.provider.resolve_location(city.as_str()).await?;
        tracing::debug!(
            name = %location.name,
            country = %location.country_code,
            lat = location.latitude,
            lon = location.longitude,
            "Resolved location"
        );

        let reading = self
            .provider
            .current_temperature(location.latitude, location.longitude)
            .await?;

        self.repo.save(city, &reading).await?;

        Ok(reading)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────────

    /// Gets the most recent stored reading for a city.
    pub async fn latest(&self, city: &str) -> Result<Reading, AppError> {
        let city = City::new(city)?;
        self.repo.latest(&city).await.map_err(Into::into)
    }

    /// Lists stored readings for a city, newest first.
    ///
    /// `limit` defaults to 10 and is clamped to 1..=100.
    pub async fn history(&self, city: &str, limit: Option<u32>) -> Result<Vec<Reading>, AppError> {
        let city = City::new(city)?;
        let limit = limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT);

        let readings = self.repo.history(&city, limit).await?;
        if readings.is_empty() {
            return Err(AppError::NotFound(format!(
                "No readings stored for {}",
                city
            )));
        }
        Ok(readings)
    }
}
