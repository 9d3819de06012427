//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use weather_types::{ReadingRepository, WeatherProvider};

use super::handlers::{self, AppState};
use crate::openapi::ApiDoc;
use crate::{RefreshHealth, WeatherService};

/// HTTP Server for the Weather API.
pub struct HttpServer<P: WeatherProvider, R: ReadingRepository> {
    state: Arc<AppState<P, R>>,
}

impl<P: WeatherProvider, R: ReadingRepository> HttpServer<P, R> {
    /// Creates a new HTTP server sharing the service with the scheduler.
    pub fn new(service: Arc<WeatherService<P, R>>, health: Arc<RefreshHealth>) -> Self {
        Self {
            state: Arc::new(AppState { service, health }),
        }
    }

    /// Builds the Axum router with all routes.
    ///
    /// `/health` shadows a city literally named "health".
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .route("/health", get(handlers::health::<P, R>))
            .route("/", get(handlers::missing_city))
            .route("/{city}", get(handlers::latest_reading::<P, R>))
            .route("/{city}/history", get(handlers::reading_history::<P, R>))
            .layer(metrics)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address until `shutdown` is cancelled,
    /// then drains in-flight requests.
    pub async fn run(self, addr: &str, shutdown: CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
