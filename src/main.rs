//! # Gym Server
//!
//! Entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Database connection pool and migrations
//! - Redis client
//! - HTTP server

use anyhow::Result;
use tracing::info;

use gym_server::config::Settings;
use gym_server::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    gym_server::telemetry::init_tracing();

    info!("Starting Gym Server...");

    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
