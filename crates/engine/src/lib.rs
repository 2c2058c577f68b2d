//! State-aggregation engine for the asset-tracking dashboard.
//!
//! Pulls tags, hubs, proximity events, and triangulation samples from the
//! tracking service, derives per-event lifecycle statuses, and projects
//! filtered views of the device population. One engine instance is created
//! at startup and passed by reference to every consumer; there is no
//! global store.

pub mod config;
pub mod device_registry;
pub mod error;
pub mod event_log;
pub mod filter;
pub mod hub_directory;
pub mod jobs;
pub mod logging;
pub mod updater;

use chrono::{DateTime, Utc};
use tracing::info;

use client::TrackingApi;
use domain::models::{Device, FilterCriterion};

pub use self::config::Config;
pub use device_registry::DeviceRegistry;
pub use error::EngineError;
pub use event_log::EventLog;
pub use hub_directory::HubDirectory;
pub use updater::{DeviceRefreshOutcome, LiveLocationUpdater, RefreshReport};

/// The aggregation engine: hub directory, device registry, and event log
/// behind one mutation surface.
///
/// All mutation happens on one sequencing context (the refresh job locks
/// the engine for a whole `refresh()`), so the components themselves carry
/// no locks.
#[derive(Debug, Default)]
pub struct TrackerEngine {
    pub hubs: HubDirectory,
    pub devices: DeviceRegistry,
    pub events: EventLog,
}

impl TrackerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the hub list and replaces the hub directory with it.
    pub async fn load_hubs(&mut self, api: &dyn TrackingApi) -> Result<usize, EngineError> {
        let hubs = api.list_hubs().await?;
        let count = hubs.len();
        self.hubs.load(hubs);
        info!(count = count, "Hub directory loaded");
        Ok(count)
    }

    /// Fetches the tag list and appends it to the device registry.
    ///
    /// When `description_filter` is set, only tags whose asset description
    /// contains the token are kept; tags without a description are dropped.
    /// Loaded devices start with no device state until first polled.
    pub async fn load_devices(
        &mut self,
        api: &dyn TrackingApi,
        description_filter: Option<&str>,
    ) -> Result<usize, EngineError> {
        let tags = api.list_tags().await?;
        let fetched = tags.len();

        let devices: Vec<Device> = tags
            .into_iter()
            .filter(|device| match description_filter {
                Some(token) => device
                    .asset_description
                    .as_deref()
                    .is_some_and(|description| description.contains(token)),
                None => true,
            })
            .map(|mut device| {
                device.device_state = None;
                device
            })
            .collect();

        let count = devices.len();
        self.devices.load(devices);
        info!(fetched = fetched, loaded = count, "Device registry loaded");
        Ok(count)
    }

    /// Visible subset of the registry under `criterion` at time `now`.
    pub fn visible(&self, criterion: &FilterCriterion, now: DateTime<Utc>) -> Vec<&Device> {
        filter::visible(&self.devices, &self.hubs, &self.events, criterion, now)
    }
}
