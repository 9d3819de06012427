//! Reading domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single temperature observation.
///
/// Readings are immutable once created. Every refresh produces a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reading {
    /// Observation time (UTC)
    #[schema(value_type = String, example = "2025-01-15T12:00:00Z")]
    pub time: DateTime<Utc>,
    /// Air temperature at 2 metres above ground, in degrees Celsius
    #[schema(example = -4.3)]
    pub temperature_2m: f64,
}

impl Reading {
    /// Creates a reading for the given observation time.
    pub fn new(time: DateTime<Utc>, temperature_2m: f64) -> Self {
        Self {
            time,
            temperature_2m,
        }
    }
}
