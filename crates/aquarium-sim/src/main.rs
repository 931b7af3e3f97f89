//! Headless aquarium runner.

mod driver;
mod store;
mod telemetry;

use anyhow::Result;
use aquarium_core::DriverConfig;
use std::path::PathBuf;
use tokio::signal;
use tracing::info;

const DEFAULT_CONFIG_PATH: &str = "./aquarium-config.json";

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    // Load configuration
    let config_path = std::env::var("AQUARIUM_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = DriverConfig::load(&config_path);

    info!("Starting aquarium, saving to {}", config.save_path);

    let driver = driver::Driver::load(config).await;
    info!(
        fish = driver.aquarium().len(),
        alive = driver.aquarium().alive_count(),
        "Aquarium ready"
    );
    let aquarium = driver.run(shutdown_signal()).await?;

    info!("Final state:\n{}", aquarium);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
