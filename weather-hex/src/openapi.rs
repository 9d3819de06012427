//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use utoipa::OpenApi;

use weather_types::{ErrorResponse, HealthResponse, HealthStatus, HistoryQuery, Reading};

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health of the periodic refresh
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Refresh loop status", body = HealthResponse)
    )
)]
async fn health() {}

/// Latest stored reading for a city
#[utoipa::path(
    get,
    path = "/{city}",
    tag = "readings",
    params(
        ("city" = String, Path, description = "City name (case-insensitive)")
    ),
    responses(
        (status = 200, description = "Most recent reading", body = Reading),
        (status = 400, description = "City is empty", body = ErrorResponse),
        (status = 404, description = "No reading stored for the city", body = ErrorResponse),
        (status = 503, description = "Reading store unavailable", body = ErrorResponse)
    )
)]
async fn latest_reading() {}

/// Stored readings for a city, newest first
#[utoipa::path(
    get,
    path = "/{city}/history",
    tag = "readings",
    params(
        ("city" = String, Path, description = "City name (case-insensitive)"),
        HistoryQuery
    ),
    responses(
        (status = 200, description = "Readings, newest first", body = Vec<Reading>),
        (status = 400, description = "City is empty", body = ErrorResponse),
        (status = 404, description = "No reading stored for the city", body = ErrorResponse),
        (status = 503, description = "Reading store unavailable", body = ErrorResponse)
    )
)]
async fn reading_history() {}

/// OpenAPI documentation for the Weather API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weather Service API",
        version = "1.0.0",
        description = "Serves the latest temperature readings collected periodically from Open-Meteo.",
        license(name = "MIT"),
    ),
    paths(health, latest_reading, reading_history),
    components(schemas(Reading, HealthResponse, HealthStatus, ErrorResponse)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "readings", description = "Stored temperature readings"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_reading_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/{city}"));
        assert!(doc.paths.paths.contains_key("/{city}/history"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
