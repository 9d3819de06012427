//! Client example: one refresh against Open-Meteo, then query the running server.
//!
//! Run with: cargo run -p weather-app --example client_example --no-default-features --features sqlite

use std::net::SocketAddr;
use std::sync::Arc;

use open_meteo::{OpenMeteoClient, OpenMeteoConfig};
use tempfile::tempdir;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use weather_client::WeatherClient;
use weather_hex::{RefreshHealth, WeatherService, inbound::HttpServer};
use weather_repo::build_repo;
use weather_types::City;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let port = addr.port();
    drop(listener);

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("weather.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on port {port}...");
    println!("   Database: {db_url}");

    let repo = build_repo(&db_url).await?;
    let provider = OpenMeteoClient::new(OpenMeteoConfig::default())?;
    let service = Arc::new(WeatherService::new(provider, repo));
    let health = Arc::new(RefreshHealth::new());

    // One refresh cycle by hand instead of running the scheduler
    let city = City::new("Moscow")?;
    let reading = service.refresh(&city).await?;
    health.record_success(reading.time);
    println!(
        "✅ Refreshed {city}: {:.1}°C at {}",
        reading.temperature_2m, reading.time
    );

    // Start server in background
    let shutdown = CancellationToken::new();
    let server = HttpServer::new(service, health);
    let server_addr = format!("127.0.0.1:{port}");
    let server_task = tokio::spawn({
        let shutdown = shutdown.clone();
        async move { server.run(&server_addr, shutdown).await }
    });

    // Wait for server to start
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;

    let client = WeatherClient::new(format!("http://127.0.0.1:{port}"));

    let status = client.health().await?;
    println!("✅ Server health: {:?}", status.status);

    let latest = client.latest("MOSCOW").await?;
    println!("✅ Latest reading: {}", serde_json::to_string(&latest)?);

    let missing = client.latest("atlantis").await;
    assert!(missing.as_ref().is_err_and(|e| e.is_not_found()));
    println!("✅ Unknown city answers 404");

    let history = client.history("moscow", Some(5)).await?;
    println!("✅ History holds {} reading(s)", history.len());

    shutdown.cancel();
    server_task.await??;
    Ok(())
}
