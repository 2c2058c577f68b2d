//! Proximity event domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status assigned to an event during ingestion.
///
/// Assigned exactly once per event when its batch is ingested and never
/// recomputed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EventStatus {
    /// Hub unresolved, or hub is not a gate.
    #[default]
    #[serde(rename = "")]
    None,
    Activated,
    Left,
    Arrived,
    Deactivated,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::None => "",
            EventStatus::Activated => "Activated",
            EventStatus::Left => "Left",
            EventStatus::Arrived => "Arrived",
            EventStatus::Deactivated => "Deactivated",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single detection of a beacon by a hub.
///
/// `hub_serial` is nullable: the upstream service emits events it could not
/// match to a known hub. `status` is not part of the wire payload; it is
/// derived at ingestion time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProximityEvent {
    pub id: i64,
    #[serde(rename = "Time")]
    pub time: DateTime<Utc>,
    #[serde(rename = "Sequence")]
    pub sequence: i64,
    #[serde(rename = "Beacon_SerialNumber")]
    pub beacon_serial: String,
    #[serde(rename = "Hub_SerialNumber", default)]
    pub hub_serial: Option<String>,
    #[serde(rename = "Decibels")]
    pub decibels: f64,
    #[serde(default)]
    pub status: EventStatus,
}
