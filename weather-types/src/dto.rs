//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Default number of readings returned by the history endpoint.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Upper bound on the history endpoint's `limit`.
pub const MAX_HISTORY_LIMIT: u32 = 100;

/// Query parameters for the reading history endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// Maximum number of readings to return (1-100)
    #[param(example = 10)]
    pub limit: Option<u32>,
}

/// Overall state of the periodic refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Response body of the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: HealthStatus,
    /// Refresh cycles that failed since the last success
    #[schema(example = 0)]
    pub consecutive_failures: u32,
    /// Completion time of the last successful refresh cycle
    #[schema(value_type = Option<String>, example = "2025-01-15T12:00:03Z")]
    pub last_success: Option<DateTime<Utc>>,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "No reading stored")]
    pub error: String,
    #[schema(example = 404)]
    pub code: u16,
}
