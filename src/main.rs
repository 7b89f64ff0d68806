//! Playlist Service — mood playlist microservice.
//!
//! Binds a ZeroMQ REP socket (default `tcp://0.0.0.0:5556`) and answers one
//! text request at a time. Ctrl+C or SIGTERM stops it cleanly.
//!
//! Environment variables:
//! - `PLAYLIST_SERVICE_CONFIG` — config file (default `<config_dir>/playlist-service/config.json`)
//! - `PLAYLIST_SERVICE_LOG_DIR` — also write rolling log files here
//! - `RUST_LOG` — log filter (default `info`)

use tracing::{error, info};

use playlist_service::catalog::{CatalogStore, JsonFileBackend};
use playlist_service::config::{get_config_path, log_dir_from_env, read_service_config};
use playlist_service::handler::RequestHandler;
use playlist_service::logger;
use playlist_service::service::{PlaylistService, ShutdownSignal};

#[tokio::main]
async fn main() {
    if let Err(e) = logger::init(log_dir_from_env()) {
        eprintln!("Failed to initialize logging: {:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = run().await {
        error!("Playlist service failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = read_service_config();
    info!(path = %get_config_path().display(), ?config, "Configuration loaded");

    let mut store = CatalogStore::new(Box::new(JsonFileBackend::new(&config.catalog_path)));
    store.load();

    let service = PlaylistService::bind(
        &config.endpoint(),
        config.recv_timeout(),
        RequestHandler::new(store),
    )
    .await?;
    info!("Playlist service listening on {}", service.endpoint());

    let shutdown = ShutdownSignal::new();
    shutdown.listen_for_interrupt();

    service.run(&shutdown).await?;
    info!("Playlist service stopped");
    Ok(())
}
