//! Error types for the weather service.

/// Domain-level errors (validation failures).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("City is required")]
    EmptyCity,
}

/// Errors from the remote weather provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The call failed, timed out, or returned a non-success status.
    #[error("Remote error: {0}")]
    Remote(String),

    /// The geocoder reported zero matches.
    #[error("No location found for city {0:?}")]
    NotFound(String),

    /// The response body did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The reported observation time could not be parsed into UTC.
    #[error("Time parse error: {0}")]
    TimeParse(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Entity not found")]
    NotFound,
}

/// Failure of one refresh cycle.
///
/// Carries the first error encountered, unchanged.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Store(#[from] RepoError),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("No reading stored".into()),
            RepoError::Database(e) => AppError::ServiceUnavailable(e),
        }
    }
}
