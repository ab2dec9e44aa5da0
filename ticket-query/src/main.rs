use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use ticket_query::cache::{CacheConfig, CachedTicketQuery};
use ticket_query::domain::TravelDate;
use ticket_query::query::TicketQuery;
use ticket_query::stations::{StationClient, StationClientConfig, StationDirectory};
use ticket_query::upstream::{LeftTicketClient, LeftTicketConfig};
use ticket_query::web::{AppState, create_router};

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

fn env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Station table (fail fast if unavailable)
    let mut station_config = StationClientConfig::new();
    if let Some(url) = env("TICKET_STATION_URL") {
        station_config = station_config.with_url(url);
    }
    let station_client = StationClient::new(station_config)?;
    let stations = Arc::new(StationDirectory::load(&station_client).await?);

    // Query client
    let mut query_config = LeftTicketConfig::new();
    if let Some(url) = env("TICKET_BASE_URL") {
        query_config = query_config.with_base_url(url);
    }
    let client = LeftTicketClient::new(query_config)?;
    let query = TicketQuery::new(stations, client);

    // One-shot mode: run a single query and print the candidates
    if let (Some(date), Some(from), Some(to)) =
        (env("TICKET_DATE"), env("TICKET_FROM"), env("TICKET_TO"))
    {
        let date: TravelDate = date.parse()?;
        let trains = query.filtered_trains(date, &from, &to).await?;
        println!("{}", serde_json::to_string(&trains)?);
        return Ok(());
    }

    let state = AppState::new(CachedTicketQuery::new(query, &CacheConfig::default()));
    let app = create_router(state);

    let addr: SocketAddr = env("TICKET_BIND_ADDR")
        .as_deref()
        .unwrap_or(DEFAULT_BIND_ADDR)
        .parse()?;
    info!(%addr, "Ticket query server listening");
    info!("  GET /health");
    info!("  GET /api/stations/search?q=");
    info!("  GET /trains?date=&from=&to=");
    info!("  GET /trains/details?date=&from=&to=");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
