//! Macrolens API Server
//!
//! Serves the indicator snapshot, the evaluated signals and the historical
//! reference table over HTTP for the dashboard front end.

use dotenvy::dotenv;
use macrolens::config::{self, StoreBackend};
use macrolens::core::http::start_server;
use macrolens::logging;
use macrolens::store::open_store;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();
    logging::init_logging();

    let port = config::get_port();
    let env = config::get_environment();
    let backend = StoreBackend::from_env()?;
    info!("Starting Macrolens API Server");
    info!(environment = %env, "Environment");
    info!(store = %backend, "Indicator store");

    let store = open_store(&backend).await?;

    tokio::select! {
        result = start_server(port, store) => {
            if let Err(e) = result {
                error!(error = %e, "HTTP server error");
                return Err(e.to_string().into());
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
    }

    info!("API server stopped");
    Ok(())
}
