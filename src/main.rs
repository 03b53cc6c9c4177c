//! Shelterwatch - monitoring backend for bus-shelter surveillance devices.
//!
//! # API Endpoints
//!
//! - `GET /shelters` - Filtered shelter list with status counts
//! - `GET /shelters/:id` - Drill-down detail of one shelter
//! - `GET /stats` - Status counts of the filtered list
//! - `GET /filters/options` - Distinct DVR and bus ids
//! - `GET /workflow` - Simulated ingestion state
//! - `POST /workflow/simulate` - Start a simulated ingestion run
//! - `GET /health` - Health check

use std::net::SocketAddr;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use shelterwatch::api::{AppState, router};
use shelterwatch::config::Config;
use shelterwatch::dashboard::Dashboard;
use shelterwatch::seed::seed_records;
use shelterwatch::store::ShelterStore;
use shelterwatch::workflow::WorkflowSimulator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("shelterwatch=info".parse()?))
        .init();

    let config = Config::from_env()?;

    info!(
        port = config.port,
        workflow_delay_ms = config.workflow_delay.as_millis() as u64,
        seed_data = config.seed_data,
        rng_seed = ?config.rng_seed,
        "Starting Shelterwatch server"
    );

    let store = if config.seed_data {
        ShelterStore::with_records(seed_records())
    } else {
        ShelterStore::new()
    };
    info!(shelters = store.len().await, "Store initialized");

    let rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let state = AppState {
        dashboard: Dashboard::new(store.clone()),
        workflow: WorkflowSimulator::new(store, config.workflow_delay, Box::new(rng)),
    };

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "Shelterwatch is listening");

    axum::serve(listener, app).await?;

    Ok(())
}
