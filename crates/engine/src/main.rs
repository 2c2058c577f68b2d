use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::Mutex;
use tracing::{info, warn};

use client::HttpTrackingApi;
use engine::jobs::{JobScheduler, RefreshJob};
use engine::{Config, LiveLocationUpdater, TrackerEngine};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    engine::logging::init_logging(&config.logging);

    info!("Starting beacon tracker v{}", env!("CARGO_PKG_VERSION"));

    let api = Arc::new(HttpTrackingApi::new(&config.tracking)?);

    // Bootstrap: a failed initial load is not fatal, it just leaves an
    // empty view until the next restart.
    let mut engine = TrackerEngine::new();
    if let Err(e) = engine.load_hubs(api.as_ref()).await {
        warn!(error = %e, "Initial hub load failed");
    }
    let description_filter = config.registry.asset_description_contains.as_deref();
    if let Err(e) = engine.load_devices(api.as_ref(), description_filter).await {
        warn!(error = %e, "Initial device load failed");
    }

    let engine = Arc::new(Mutex::new(engine));
    let updater = LiveLocationUpdater::new(api, &config.tracking);

    let mut scheduler = JobScheduler::new();
    scheduler.register(RefreshJob::new(
        Arc::clone(&engine),
        updater,
        config.poll.interval_secs,
    ));
    scheduler.start();

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    scheduler.shutdown();
    scheduler.wait_for_shutdown(Duration::from_secs(10)).await;

    Ok(())
}
