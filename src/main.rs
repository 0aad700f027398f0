//! Marketplace backend server binary.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use bazaar_backend::config::{load_config, ServerConfig};
use bazaar_backend::db;
use bazaar_backend::http::HttpServer;
use bazaar_backend::lifecycle::{wait_for_signal, Shutdown};
use bazaar_backend::observability::{logging, metrics};

#[derive(Debug, Parser)]
#[command(name = "bazaar-backend", about = "Marketplace backend server")]
struct Args {
    /// Path to the TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    logging::init_logging(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        database = %config.database.database,
        image_dir = %config.images.directory,
        "bazaar-backend v0.1.0 starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let database = db::connect(&config.database).await?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config, database)?;
    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
