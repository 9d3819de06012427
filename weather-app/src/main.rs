//! # Weather Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter and the Open-Meteo client
//! - Create the weather service
//! - Run the refresh scheduler and the HTTP server until shutdown

mod config;

use std::sync::Arc;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use open_meteo::OpenMeteoClient;
use weather_hex::{RefreshHealth, RefreshScheduler, WeatherService, inbound::HttpServer};
use weather_repo::build_repo;

fn init_tracer(endpoint: &str) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("weather-service"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize OpenTelemetry tracing when a collector is configured
    let (otel_tracer, otel_provider) = match config.otlp_endpoint.as_deref() {
        Some(endpoint) => {
            let (tracer, provider) = init_tracer(endpoint)?;
            (Some(tracer), Some(provider))
        }
        None => (None, None),
    };
    let telemetry = otel_tracer.map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer));

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,weather_app=debug,weather_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!(
        city = %config.target_city,
        interval_secs = config.refresh_interval.as_secs(),
        "Starting weather server on {}",
        config.listen_addr
    );

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;
    tracing::info!("Using {} reading store", repo.backend());

    let provider = OpenMeteoClient::new(config.open_meteo())?;

    // Shared by the scheduler and the HTTP handlers
    let service = Arc::new(WeatherService::new(provider, repo));
    let health = Arc::new(RefreshHealth::new());
    let shutdown = CancellationToken::new();

    let scheduler = RefreshScheduler::new(
        service.clone(),
        config.target_city.clone(),
        config.refresh_interval,
        health.clone(),
    );
    let scheduler_task = tokio::spawn(scheduler.run(shutdown.clone()));

    let server = HttpServer::new(service, health);
    let server_task = tokio::spawn({
        let addr = config.listen_addr.clone();
        let shutdown = shutdown.clone();
        async move { server.run(&addr, shutdown).await }
    });

    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            shutdown_signal().await;
            shutdown.cancel();
        }
    });

    let server_result = server_task.await?;
    if let Err(e) = &server_result {
        tracing::error!("HTTP server failed: {}", e);
    }

    // Stop the scheduler even when the server exited on its own
    shutdown.cancel();
    scheduler_task.await?;

    // Ensure traces are flushed before exit
    if let Some(provider) = otel_provider {
        let _ = provider.shutdown();
    }

    server_result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
