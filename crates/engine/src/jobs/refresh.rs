//! Periodic refresh job: one full updater pass per tick.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::jobs::scheduler::{Job, JobFrequency};
use crate::updater::LiveLocationUpdater;
use crate::TrackerEngine;

/// Runs the live location updater against the shared engine.
///
/// The engine mutex is held for the whole pass, which serializes it
/// against any other writer; reads between ticks see a consistent view.
pub struct RefreshJob {
    engine: Arc<Mutex<TrackerEngine>>,
    updater: LiveLocationUpdater,
    interval_secs: u64,
}

impl RefreshJob {
    pub fn new(
        engine: Arc<Mutex<TrackerEngine>>,
        updater: LiveLocationUpdater,
        interval_secs: u64,
    ) -> Self {
        Self {
            engine,
            updater,
            interval_secs,
        }
    }
}

#[async_trait::async_trait]
impl Job for RefreshJob {
    fn name(&self) -> &'static str {
        "live_location_refresh"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Seconds(self.interval_secs)
    }

    async fn execute(&self) -> Result<(), String> {
        let mut engine = self.engine.lock().await;
        let report = self.updater.refresh(&mut engine).await;

        info!(
            updated = report.updated(),
            failed = report.failed(),
            skipped = report.skipped,
            "Refresh pass finished"
        );
        Ok(())
    }
}
