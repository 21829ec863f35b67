//! Command line flight finder

use anyhow::{bail, Context};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use svc_flight_finder::airports::AirportDirectory;
use svc_flight_finder::offers::parse_offers;
use svc_flight_finder::router::{route_path, select_best_with, LogObserver};
use svc_flight_finder::*;

/// Pick the best itinerary out of a saved flight-offers response.
#[derive(Parser, Debug)]
#[command(name = "svc-flight-finder", version, about)]
struct Cli {
    /// Flight-offers search response, as JSON
    #[arg(long)]
    offers: PathBuf,

    /// IATA code of the departure airport
    #[arg(long)]
    origin: String,

    /// OpenFlights airports.dat, overrides AIRPORTS_FILE
    #[arg(long)]
    airports: Option<PathBuf>,
}

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Will use default config settings if no environment vars are found.
    let config = Config::try_from_env()
        .context("Failed to load configuration from environment")?;

    // Try to load log configuration from the provided log file.
    // Will default to stderr debug logging if the file can not be loaded.
    if let Err(e) = load_logger_config_from_file(config.log_config.as_str()).await {
        log::error!("(main) {}", e);
    }

    info!("(main) Reading offers from [{}].", cli.offers.display());
    let json = tokio::fs::read_to_string(&cli.offers)
        .await
        .with_context(|| format!("Could not read offers file [{}]", cli.offers.display()))?;

    let mut observer = LogObserver;
    let itineraries = parse_offers(&json, &config.default_currency, &mut observer)?;
    if itineraries.is_empty() {
        bail!("No flights found.");
    }

    let origin = cli.origin.trim().to_uppercase();
    let best = select_best_with(&itineraries, &origin, &mut observer);

    let airports_file = cli
        .airports
        .unwrap_or_else(|| PathBuf::from(&config.airports_file));
    let directory = match AirportDirectory::from_path(&airports_file) {
        Ok(directory) => directory,
        Err(e) => {
            log::warn!("(main) {} The route will not be drawn.", e);
            AirportDirectory::default()
        }
    };
    let path = route_path(best, &directory);

    let output = serde_json::json!({
        "itinerary": best,
        "path": path,
        "total_distance_km": path.total_distance_km(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    // Make sure all log message are written/ displayed before shutdown
    log::logger().flush();

    Ok(())
}
