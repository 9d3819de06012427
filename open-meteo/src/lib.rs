//! # Open-Meteo Adapter
//!
//! Implements the [`WeatherProvider`] port against the public Open-Meteo
//! APIs:
//! - geocoding: `GET /v1/search?name=<city>&count=1`
//! - forecast: `GET /v1/forecast?latitude=..&longitude=..&current=temperature_2m`
//!
//! Both base URLs are configurable so tests can point the client at a mock
//! server.
//!
//! # Example
//! ```no_run
//! use open_meteo::{OpenMeteoClient, OpenMeteoConfig};
//! use weather_types::WeatherProvider;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = OpenMeteoClient::new(OpenMeteoConfig::default())?;
//! let location = client.resolve_location("moscow").await?;
//! let reading = client
//!     .current_temperature(location.latitude, location.longitude)
//!     .await?;
//! println!("{} °C at {}", reading.temperature_2m, reading.time);
//! # Ok(())
//! # }
//! ```

mod dto;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;

use weather_types::{Location, ProviderError, Reading, WeatherProvider};

use crate::dto::{ForecastResponse, GeocodingResponse};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";
pub const DEFAULT_LANGUAGE: &str = "ru";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("weather-service/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`OpenMeteoClient`].
#[derive(Debug, Clone)]
pub struct OpenMeteoConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
    /// Language of place names returned by the geocoder
    pub language: String,
    /// Bound applied to every remote call
    pub timeout: Duration,
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client for the Open-Meteo geocoding and forecast APIs.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
    language: String,
}

impl OpenMeteoClient {
    /// Creates a new client with the given settings.
    pub fn new(config: OpenMeteoConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            geocoding_url: config.geocoding_url.trim_end_matches('/').to_string(),
            forecast_url: config.forecast_url.trim_end_matches('/').to_string(),
            language: config.language,
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let resp = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(remote_error)?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(%url, %status, "Open-Meteo returned non-success status");
            return Err(ProviderError::Remote(format!(
                "{} returned {}",
                url,
                status.as_u16()
            )));
        }

        let body = resp.text().await.map_err(remote_error)?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(%url, "Open-Meteo response did not decode: {}", e);
            ProviderError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    #[tracing::instrument(skip(self))]
    async fn resolve_location(&self, city: &str) -> Result<Location, ProviderError> {
        let query = [
            ("name", city.to_string()),
            ("count", "1".to_string()),
            ("language", self.language.clone()),
            ("format", "json".to_string()),
        ];
        let resp: GeocodingResponse = self
            .get(format!("{}/v1/search", self.geocoding_url), &query)
            .await?;

        let first = resp
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::NotFound(city.to_string()))?;

        Ok(Location {
            name: first.name,
            country_code: first.country_code,
            country: first.country,
            latitude: first.latitude,
            longitude: first.longitude,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn current_temperature(&self, lat: f64, lon: f64) -> Result<Reading, ProviderError> {
        let query = [
            ("latitude", lat.to_string()),
            ("longitude", lon.to_string()),
            ("current", "temperature_2m".to_string()),
            ("timezone", "GMT".to_string()),
        ];
        let resp: ForecastResponse = self
            .get(format!("{}/v1/forecast", self.forecast_url), &query)
            .await?;

        let time = parse_observation_time(&resp.current.time)?;
        Ok(Reading::new(time, resp.current.temperature_2m))
    }
}

fn remote_error(err: reqwest::Error) -> ProviderError {
    tracing::debug!(timeout = err.is_timeout(), "Open-Meteo request failed: {}", err);
    if err.is_timeout() {
        ProviderError::Remote(format!("request timed out: {err}"))
    } else {
        ProviderError::Remote(err.to_string())
    }
}

/// Parses Open-Meteo's `current.time` into UTC.
///
/// The API reports minutes-precision local time without an offset
/// (`2025-01-15T12:00`); with `timezone=GMT` that local time is UTC.
fn parse_observation_time(raw: &str) -> Result<DateTime<Utc>, ProviderError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            tracing::debug!("Unparseable observation time {:?}: {}", raw, e);
            ProviderError::TimeParse(format!("{raw:?}: {e}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_minutes_precision() {
        let time = parse_observation_time("2025-01-15T12:45").unwrap();
        assert_eq!(time, Utc.with_ymd_and_hms(2025, 1, 15, 12, 45, 0).unwrap());
    }

    #[test]
    fn test_parse_seconds_precision() {
        let time = parse_observation_time("2025-01-15T12:45:30").unwrap();
        assert_eq!(time, Utc.with_ymd_and_hms(2025, 1, 15, 12, 45, 30).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        let time = parse_observation_time("2025-01-15T15:45:00+03:00").unwrap();
        assert_eq!(time, Utc.with_ymd_and_hms(2025, 1, 15, 12, 45, 0).unwrap());
    }

    #[test]
    fn test_parse_garbage_is_time_parse_error() {
        assert!(matches!(
            parse_observation_time("yesterday"),
            Err(ProviderError::TimeParse(_))
        ));
    }

    #[test]
    fn test_base_urls_trimmed() {
        let client = OpenMeteoClient::new(OpenMeteoConfig {
            geocoding_url: "http://localhost:8080/".into(),
            forecast_url: "http://localhost:8081/".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.geocoding_url, "http://localhost:8080");
        assert_eq!(client.forecast_url, "http://localhost:8081");
    }
}
