//! Location domain model.

use serde::{Deserialize, Serialize};

/// A geographical location resolved from a city name.
///
/// Locations are ephemeral: they exist only for the duration of one
/// refresh cycle and are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Place name as reported by the geocoder
    pub name: String,
    /// ISO 3166-1 alpha-2 country code
    pub country_code: String,
    /// Country name, when the geocoder supplies one
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}
