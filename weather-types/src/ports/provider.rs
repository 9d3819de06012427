//! Weather provider port.
//!
//! Implementations can be HTTP clients, stubs for tests, etc.

use crate::domain::{Location, Reading};
use crate::error::ProviderError;

/// Port trait for the remote geocoding + weather service.
///
/// Implementations hold no state between calls and must tolerate
/// concurrent invocation.
#[async_trait::async_trait]
pub trait WeatherProvider: Send + Sync + 'static {
    /// Resolves a city name to its best (first) geocoding match.
    async fn resolve_location(&self, city: &str) -> Result<Location, ProviderError>;

    /// Fetches the current temperature at the given coordinates.
    async fn current_temperature(&self, lat: f64, lon: f64) -> Result<Reading, ProviderError>;
}
