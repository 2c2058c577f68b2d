//! The tracking service's read API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use domain::models::{Device, Hub, ProximityEvent, TriangulationSample};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Read-only view of the tracking service.
///
/// Four endpoints, all GET, all returning JSON lists. Event lists may come
/// back unsorted; callers re-sort by time.
#[async_trait]
pub trait TrackingApi: Send + Sync {
    /// `GET api/tag` — all registered tags, raw attribute set.
    async fn list_tags(&self) -> Result<Vec<Device>, ClientError>;

    /// `GET hub` — all hubs.
    async fn list_hubs(&self) -> Result<Vec<Hub>, ClientError>;

    /// `GET event/{serial}/{count}` — recent events for one beacon.
    async fn events_for_beacon(
        &self,
        serial: &str,
        count: u32,
    ) -> Result<Vec<ProximityEvent>, ClientError>;

    /// `GET api/tag/triangulationPoints/{serial}/{count}` — recent position
    /// samples for one device.
    async fn triangulation_points(
        &self,
        serial: &str,
        count: u32,
    ) -> Result<Vec<TriangulationSample>, ClientError>;
}

/// `reqwest`-backed implementation of [`TrackingApi`].
pub struct HttpTrackingApi {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl HttpTrackingApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        if config.base_url.is_empty() {
            return Err(ClientError::NotConfigured);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.endpoint(path);
        debug!(url = %url, "Fetching from tracking service");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout(self.timeout_secs)
            } else {
                ClientError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(ClientError::Http)
    }
}

#[async_trait]
impl TrackingApi for HttpTrackingApi {
    async fn list_tags(&self) -> Result<Vec<Device>, ClientError> {
        self.get_json("api/tag").await
    }

    async fn list_hubs(&self) -> Result<Vec<Hub>, ClientError> {
        self.get_json("hub").await
    }

    async fn events_for_beacon(
        &self,
        serial: &str,
        count: u32,
    ) -> Result<Vec<ProximityEvent>, ClientError> {
        self.get_json(&format!("event/{}/{}", serial, count)).await
    }

    async fn triangulation_points(
        &self,
        serial: &str,
        count: u32,
    ) -> Result<Vec<TriangulationSample>, ClientError> {
        self.get_json(&format!("api/tag/triangulationPoints/{}/{}", serial, count))
            .await
    }
}
