//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use weather_types::{AppError, ErrorResponse, HistoryQuery, ReadingRepository, WeatherProvider};

use crate::{RefreshHealth, WeatherService};

/// Application state shared across handlers.
pub struct AppState<P: WeatherProvider, R: ReadingRepository> {
    pub service: Arc<WeatherService<P, R>>,
    pub health: Arc<RefreshHealth>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Reading store unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Reading store unavailable".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: message,
            code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint, reflecting the state of the refresh loop.
pub async fn health<P: WeatherProvider, R: ReadingRepository>(
    State(state): State<Arc<AppState<P, R>>>,
) -> impl IntoResponse {
    Json(state.health.snapshot())
}

/// `GET /` - the city segment is missing.
pub async fn missing_city() -> ApiError {
    AppError::BadRequest("city is required".into()).into()
}

/// Latest stored reading for a city.
#[tracing::instrument(skip(state))]
pub async fn latest_reading<P: WeatherProvider, R: ReadingRepository>(
    State(state): State<Arc<AppState<P, R>>>,
    Path(city): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let reading = state.service.latest(&city).await?;
    Ok(Json(reading))
}

/// Stored readings for a city, newest first.
#[tracing::instrument(skip(state))]
pub async fn reading_history<P: WeatherProvider, R: ReadingRepository>(
    State(state): State<Arc<AppState<P, R>>>,
    Path(city): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let readings = state.service.history(&city, query.limit).await?;
    Ok(Json(readings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use weather_types::RepoError;

    async fn error_body(err: AppError) -> (StatusCode, ErrorResponse) {
        let response = ApiError(err).into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_error_status_mapping() {
        let err = AppError::BadRequest("city is required".into());
        let (status, body) = error_body(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, 400);
        assert_eq!(body.error, "city is required");

        let (status, body) = error_body(RepoError::NotFound.into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, 404);
    }

    #[tokio::test]
    async fn test_store_failure_hides_driver_message() {
        let err: AppError = RepoError::Database("connection refused".into()).into();
        let (status, body) = error_body(err).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.code, 503);
        assert_eq!(body.error, "Reading store unavailable");
    }
}
