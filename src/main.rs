//! # Chat Relay
//!
//! Application entry point. Initializes tracing, loads configuration,
//! connects the message store, and serves HTTP and WebSocket traffic.

use anyhow::Result;
use tracing::{error, info};

use chat_relay::config::Settings;
use chat_relay::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    chat_relay::telemetry::init_tracing();

    info!("Starting Chat Relay...");

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        backend = ?settings.database.backend,
        "Configuration loaded"
    );

    // A store that cannot be reached at startup is fatal
    let application = match Application::build(settings).await {
        Ok(application) => application,
        Err(e) => {
            error!("Failed to start: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
