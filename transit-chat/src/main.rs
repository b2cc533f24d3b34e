use std::error::Error;

use tracing::info;
use tracing_subscriber::EnvFilter;

use transit_chat::assistant::Assistant;
use transit_chat::bart::{BartClient, RailService};
use transit_chat::config::AppConfig;
use transit_chat::intent::WitClient;
use transit_chat::nextbus::{BusService, NextBusClient};
use transit_chat::transport::HttpTransport;
use transit_chat::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let transport = HttpTransport::new(config.http)?;

    // Directories are built once up front; fail fast if a provider is down.
    info!("fetching BART stations");
    let rail = RailService::build(BartClient::new(config.bart, transport.clone())).await?;
    info!(stations = rail.stations().len(), "loaded BART stations");

    info!(agency = %config.nextbus.agency, "fetching NextBus routes");
    let bus = BusService::build(NextBusClient::new(config.nextbus, transport.clone())).await?;
    info!(routes = bus.routes().len(), "loaded NextBus routes");

    let classifier = WitClient::new(config.wit, transport);
    let state = AppState::new(Assistant::new(classifier, rail, bus));
    let app = create_router(state);

    info!(addr = %config.listen_addr, "listening");
    info!("  GET  /health");
    info!("  POST /chat              - Answer a transit question");
    info!("  GET  /rail/stations     - List BART stations");
    info!("  GET  /rail/departures   - Departures from a station");
    info!("  GET  /rail/plan         - Departures toward a destination");
    info!("  GET  /bus/routes        - List bus routes");
    info!("  GET  /bus/departures    - Departures on a route at a stop");

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
