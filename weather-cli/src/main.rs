//! Weather CLI
//!
//! Command-line interface for the Weather API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use weather_client::WeatherClient;
use weather_types::{City, HealthStatus};

#[derive(Parser)]
#[command(name = "weather")]
#[command(author, version, about = "Weather API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Weather API
    #[arg(long, env = "WEATHER_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the latest stored reading for a city
    Get {
        /// City name (case-insensitive)
        city: String,
    },
    /// Show stored readings for a city, newest first
    History {
        /// City name (case-insensitive)
        city: String,
        /// Maximum number of readings (1-100)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Check the state of the refresh loop
    Health,
}

fn parse_city(s: &str) -> Result<City> {
    City::new(s).map_err(|_| anyhow::anyhow!("City name must not be empty"))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = WeatherClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let health = client.health().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
            if health.status == HealthStatus::Degraded {
                std::process::exit(1);
            }
        }
        Commands::Get { city } => {
            let city = parse_city(&city)?;
            match client.latest(city.as_str()).await {
                Ok(reading) => println!("{}", serde_json::to_string_pretty(&reading)?),
                Err(e) if e.is_not_found() => {
                    eprintln!("No reading stored for {}", city);
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::History { city, limit } => {
            let city = parse_city(&city)?;
            let readings = client.history(city.as_str(), limit).await?;
            println!("{}", serde_json::to_string_pretty(&readings)?);
        }
    }

    Ok(())
}
