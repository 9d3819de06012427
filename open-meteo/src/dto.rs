//! Wire shapes of the Open-Meteo responses.

use serde::Deserialize;

/// Body of `GET /v1/search`.
///
/// The API omits `results` entirely when nothing matches.
#[derive(Debug, Deserialize)]
pub(crate) struct GeocodingResponse {
    #[serde(default)]
    pub results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodingResult {
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub country_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Body of `GET /v1/forecast` with `current=temperature_2m`.
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    pub current: CurrentWeather,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentWeather {
    pub time: String,
    pub temperature_2m: f64,
}
