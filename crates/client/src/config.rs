//! Transport configuration.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the tracking service (required).
    #[serde(default)]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How many recent events to request per beacon.
    #[serde(default = "default_event_fetch_count")]
    pub event_fetch_count: u32,

    /// How many triangulation samples to request per device.
    #[serde(default = "default_triangulation_fetch_count")]
    pub triangulation_fetch_count: u32,
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_event_fetch_count() -> u32 {
    20
}
fn default_triangulation_fetch_count() -> u32 {
    10
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: default_timeout_secs(),
            event_fetch_count: default_event_fetch_count(),
            triangulation_fetch_count: default_triangulation_fetch_count(),
        }
    }
}
